// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for macro-cli
// ABOUTME: Provides access to one-shot conversion commands and the interactive session

pub mod convert;
pub mod session;
