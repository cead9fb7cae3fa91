// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

pub mod client;
pub mod normalizer;
pub mod prompt;

pub use client::{ApiStyle, ModelSettings, TranslationClient, Transport};
