// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Data models for the application.

pub mod consent;
pub mod post;

pub use consent::ConsentRecord;
pub use post::{Participants, WorkoutAo, WorkoutMember, WorkoutPost};
