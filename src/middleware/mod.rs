// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Middleware modules.

pub mod security;

pub use security::add_security_headers;
