use serde::{Deserialize, Serialize};

/// Painted striping for one parking row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripingLayout {
    pub stall_count: usize,
    pub line_count: usize,
    pub lineal_feet: f64,
}

/// Stall count, painted divider lines and lineal footage for a row.
///
/// Each divider runs the stall depth. With `include_ends` both end stalls get
/// an outer line; otherwise only the lines between stalls are painted.
pub fn striping_layout(
    row_length_ft: f64,
    stall_width_ft: f64,
    stall_depth_ft: f64,
    include_ends: bool,
) -> StripingLayout {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(row_length_ft) || !valid(stall_width_ft) || !valid(stall_depth_ft) {
        return StripingLayout { stall_count: 0, line_count: 0, lineal_feet: 0.0 };
    }

    let stall_count = (row_length_ft / stall_width_ft + 1e-9).floor() as usize;
    let line_count = match (stall_count, include_ends) {
        (0, _) => 0,
        (n, true) => n + 1,
        (n, false) => n - 1,
    };

    StripingLayout { stall_count, line_count, lineal_feet: line_count as f64 * stall_depth_ft }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_with_ends() {
        let layout = striping_layout(90.0, 9.0, 18.0, true);
        assert_eq!(layout.stall_count, 10);
        assert_eq!(layout.line_count, 11);
        assert_eq!(layout.lineal_feet, 198.0);
    }

    #[test]
    fn test_layout_interior_only() {
        let layout = striping_layout(100.0, 9.0, 18.0, false);
        assert_eq!(layout.stall_count, 11);
        assert_eq!(layout.line_count, 10);
        assert_eq!(layout.lineal_feet, 180.0);
    }

    #[test]
    fn test_degenerate_layouts() {
        assert_eq!(striping_layout(5.0, 9.0, 18.0, false).line_count, 0);
        assert_eq!(striping_layout(100.0, 0.0, 18.0, true).stall_count, 0);
        assert_eq!(striping_layout(f64::NAN, 9.0, 18.0, true).lineal_feet, 0.0);
    }
}
