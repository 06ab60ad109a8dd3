/* ************************************************************************ **
** This file is part of bridgecv, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
**                                                                          **
** Be aware that not all of bridgecv is provided under this permissive      **
** license, and that the project as a whole is licensed under the GPL 3.0.  **
** ************************************************************************ */

use crate::types::*;
use bridgecv_assert_close::{CheckClose, CheckCloseError, Tolerances};

impl CheckClose for V3 {
    type Scalar = f64;

    #[inline]
    fn check_close(&self, other: &V3, tol: Tolerances) -> Result<(), CheckCloseError<f64>>
    { self.0.check_close(&other.0, tol) }
}

impl CheckClose for M33 {
    type Scalar = f64;

    #[inline]
    fn check_close(&self, other: &M33, tol: Tolerances) -> Result<(), CheckCloseError<f64>>
    { self.0.check_close(&other.0, tol) }
}

#[test]
fn vectors_compare_elementwise() {
    assert_close!(abs=1e-9, V3([1.0, 2.0, 3.0]), V3([1.0, 2.0, 3.0 + 1e-12]));
    assert_close!(abs=1e-9, vec![V3::zero(), V3([1e-13; 3])], vec![V3::zero(); 2]);
    assert!(V3::zero().check_close(&V3([0.0, 1.0, 0.0]), Tolerances { abs: 1e-3, rel: 0.0 }).is_err());
}
