use crate::core::data::point::{PlanePoint, Point};

/// Maps a raster pixel onto the plane.
///
/// The raster centre lands on `center`, one pixel spans `scale` plane units
/// and the y axis is flipped so the plane grows upward.
#[must_use]
pub fn pixel_to_plane_coords(
    pixel: Point,
    width: u32,
    height: u32,
    center: PlanePoint,
    scale: f64,
) -> PlanePoint {
    let mid_x = f64::from(width) / 2.0;
    let mid_y = f64::from(height) / 2.0;

    PlanePoint {
        x: (f64::from(pixel.x) - mid_x) * scale + center.x,
        y: -(f64::from(pixel.y) - mid_y) * scale + center.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: PlanePoint = PlanePoint { x: 0.0, y: 0.0 };

    #[test]
    fn test_raster_centre_maps_to_view_centre() {
        let result = pixel_to_plane_coords(Point { x: 50, y: 50 }, 100, 100, ORIGIN, 1.0);

        assert_eq!(result, PlanePoint { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_top_left_maps_up_and_left() {
        let result = pixel_to_plane_coords(Point { x: 0, y: 0 }, 100, 100, ORIGIN, 1.0);

        assert_eq!(result, PlanePoint { x: -50.0, y: 50.0 });
    }

    #[test]
    fn test_y_axis_is_inverted() {
        let above = pixel_to_plane_coords(Point { x: 50, y: 10 }, 100, 100, ORIGIN, 1.0);
        let below = pixel_to_plane_coords(Point { x: 50, y: 90 }, 100, 100, ORIGIN, 1.0);

        assert!(above.y > 0.0);
        assert!(below.y < 0.0);
    }

    #[test]
    fn test_scale_and_centre_offset() {
        let center = PlanePoint { x: -0.75, y: 0.25 };

        let result = pixel_to_plane_coords(Point { x: 60, y: 40 }, 100, 80, center, 0.5);

        // (60 - 50) * 0.5 - 0.75, -(40 - 40) * 0.5 + 0.25
        assert_eq!(result, PlanePoint { x: 4.25, y: 0.25 });
    }

    #[test]
    fn test_odd_dimensions_use_fractional_midpoint() {
        let result = pixel_to_plane_coords(Point { x: 0, y: 0 }, 3, 3, ORIGIN, 1.0);

        assert_eq!(result, PlanePoint { x: -1.5, y: 1.5 });
    }
}
