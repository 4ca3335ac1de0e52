// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the medgate CLI

pub mod access;
pub mod agreement;
pub mod directory;
pub mod disclaimer;
pub mod sponsor;

pub use self::agreement::AgreementCommand;
pub use self::directory::DirectoryCommand;
pub use self::disclaimer::DisclaimerCommand;
pub use self::sponsor::SponsorCommand;
