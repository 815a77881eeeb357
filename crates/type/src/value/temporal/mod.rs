// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

mod clock;
mod date;

pub use clock::{Datetime, Time, Timestamp};
pub use date::Date;
