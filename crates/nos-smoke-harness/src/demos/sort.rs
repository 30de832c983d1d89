use nos_smoke_core::bubble_sort;
use nos_smoke_core::sort::is_sorted_ascending;

use super::join;
use crate::error::DemoError;
use crate::session::Session;

pub const SAMPLE: [i32; 10] = [64, 34, 25, 12, 22, 11, 90, 88, 76, 50];

pub fn run(s: &mut Session<'_>) -> Result<(), DemoError> {
    let mut data = SAMPLE;
    s.line(format_args!("  排序前 before: {}", join(&data)))?;
    let swaps = bubble_sort(&mut data);
    s.line(format_args!("  排序后 after:  {}", join(&data)))?;
    s.line(format_args!("  swaps: {swaps}"))?;

    let mut reference = SAMPLE;
    reference.sort_unstable();
    s.check("升序 ascending", is_sorted_ascending(&data), None)?;
    s.check("排列不变 permutation", data == reference, None)?;
    Ok(())
}
