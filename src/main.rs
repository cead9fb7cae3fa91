// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

mod bundle;
mod cli;
mod config;
mod llm;
mod logger;
mod scraper;
mod subcmd;

fn main() {
    cli::execute().unwrap_or_else(|err| {
        eprintln!("\x1B[31m{0}\x1B[0m", err);
        std::process::exit(1);
    });
}
