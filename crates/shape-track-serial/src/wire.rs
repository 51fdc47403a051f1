//! ASCII wire format shared with the microcontroller.

use shape_track_core::TrackingReport;

/// Inbound line that arms the link for one transmission.
pub const READY_SENTINEL: &str = "RECEIVING DATA";

/// Encode a report as `x_offset;y_offset;z_distance;contour_area`, newline
/// terminated.
pub fn encode_report(report: &TrackingReport) -> String {
    format!(
        "{};{};{};{}\n",
        report.x_offset, report.y_offset, report.z_distance, report.contour_area
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_semicolon_joined_in_fixed_order() {
        let report = TrackingReport {
            x_offset: -3.25,
            y_offset: 1.5,
            z_distance: 42.0,
            contour_area: 2500.0,
        };
        assert_eq!(encode_report(&report), "-3.25;1.5;42;2500\n");
    }

    #[test]
    fn zero_report_encodes_zeros() {
        assert_eq!(encode_report(&TrackingReport::default()), "0;0;0;0\n");
    }
}
