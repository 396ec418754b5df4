//! Implementation of `pst donate`.

use crate::app_info::{APP_NAME, DONATE_URL, USDT_TRC20_WALLET};
use crate::error::Result;
use std::io::{self, Write};

use super::write_failed;

pub(crate) fn write_donate_info<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Thank you for supporting {}!", APP_NAME).map_err(write_failed)?;
    writeln!(out).map_err(write_failed)?;
    writeln!(out, "  Donate:          {}", DONATE_URL).map_err(write_failed)?;
    writeln!(out, "  USDT (TRC20):    {}", USDT_TRC20_WALLET).map_err(write_failed)
}

pub fn cmd_donate() -> Result<()> {
    write_donate_info(&mut io::stdout().lock())
}
