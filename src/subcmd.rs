// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

pub mod extract;
pub mod translate;
pub mod check_api;

pub use self::extract::subcmd_extract;
pub use translate::subcmd_translate;
pub use check_api::subcmd_check_api;
