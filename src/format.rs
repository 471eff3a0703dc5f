/// Integral results print as exact integers; everything else is rounded to
/// 10 decimal places to hide floating-point representation noise.
pub fn format_value(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    if x.fract() == 0.0 {
        // Fold -0.0 into plain 0.
        let x = if x == 0.0 { 0.0 } else { x };
        return format!("{}", x);
    }
    let rounded = (x * 1e10).round() / 1e10;
    format!("{}", rounded)
}
