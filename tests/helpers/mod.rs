// ABOUTME: Shared helper modules for integration tests
// ABOUTME: Re-exports the Axum request/response test utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

pub mod axum_test;
