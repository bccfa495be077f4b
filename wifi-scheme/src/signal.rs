/*!
 * Signal quality conversion
 */

const DBM_FLOOR: i64 = -100;
const DBM_CEILING: i64 = -50;

/// Estimate dBm from a raw link quality reading, clamped to [-100, -50].
///
/// Equivalent to truncating `quality / 2.0 - 100.0` toward zero, so a
/// quality of 1 yields -99 rather than -100.
pub fn to_dbm(quality: i32) -> i32 {
    // Integer `/` truncates toward zero; widen first so the offset cannot overflow.
    let dbm = (i64::from(quality) - 200) / 2;
    dbm.clamp(DBM_FLOOR, DBM_CEILING) as i32
}
