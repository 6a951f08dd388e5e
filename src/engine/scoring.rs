/// Percentage of `correct` out of `total`, rounded to the nearest integer.
/// Zero when nothing has been answered yet.
pub fn calculate_accuracy(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}
