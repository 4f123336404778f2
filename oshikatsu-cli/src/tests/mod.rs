//! Shared test harness modules for the oshikatsu CLI.

use super::*;

mod command_steps;
mod helpers;
