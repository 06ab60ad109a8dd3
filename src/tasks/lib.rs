/* ********************************************************************** **
**  This file is part of bridgecv.                                        **
**                                                                        **
**  bridgecv is free software: you can redistribute it and/or modify it   **
**  under the terms of the GNU General Public License as published by the **
**  Free Software Foundation, either version 3 of the License, or (at     **
**  your option) any later version.                                       **
**                                                                        **
**      http://www.gnu.org/licenses/                                      **
**                                                                        **
** Do note that, while the whole of bridgecv is licensed under the GPL,   **
** many parts of it are licensed under more permissive terms.             **
** ********************************************************************** */

//! Everything between the command line and the colvars themselves.

#[cfg(test)] #[macro_use] extern crate bridgecv_assert_close;
#[macro_use] extern crate failure;
#[macro_use] extern crate log;

pub mod entry_points;

mod driver;
mod logging;
mod trajectory;

pub use crate::driver::Driver;
pub use crate::logging::GlobalLogger;
pub use crate::trajectory::{Frame, XyzReader};

pub type FailResult<T> = Result<T, failure::Error>;
