use crate::core::distance::haversine_distance;
use crate::models::{CourseWaypoint, TrackPoint};
use gpx::{Gpx, Waypoint};
use std::io::Cursor;

/// Upper bound on chart points returned to renderers
///
/// The sampled sequence holds at most this many strided points plus the
/// explicitly appended final point.
pub const MAX_CHART_POINTS: usize = 200;

/// Parsed course: full-resolution points, matched waypoints and the
/// bounded chart sample
#[derive(Debug, Clone, Default)]
pub struct CourseProfile {
    pub track_points: Vec<TrackPoint>,
    pub waypoints: Vec<CourseWaypoint>,
    pub sampled_track_points: Vec<TrackPoint>,
}

impl CourseProfile {
    pub fn total_distance_km(&self) -> f64 {
        self.track_points
            .last()
            .map(|p| p.distance_km)
            .unwrap_or(0.0)
    }
}

/// Parse a GPX source into a course profile
///
/// Track points are preferred; a file with only route points falls back
/// to those. Declared waypoints are matched to the nearest track point
/// by haversine distance. A malformed or empty source degrades to an
/// empty profile and is never an error: showing a blank chart beats
/// failing a live results page.
pub fn parse_course(source: &str) -> CourseProfile {
    let gpx = match parse_gpx(source) {
        Some(gpx) => gpx,
        None => {
            tracing::warn!("Unparseable GPX source, returning empty profile");
            return CourseProfile::default();
        }
    };

    let points = course_points(&gpx);
    if points.is_empty() {
        tracing::warn!("GPX source contains no track or route points");
        return CourseProfile::default();
    }

    let track_points = accumulate_distance(&points);
    let waypoints = match_waypoints(&gpx.waypoints, &track_points);
    let sampled_track_points = sample_track(&track_points, MAX_CHART_POINTS);

    tracing::debug!(
        "Parsed course: {} points, {} waypoints, {:.2} km",
        track_points.len(),
        waypoints.len(),
        track_points.last().map(|p| p.distance_km).unwrap_or(0.0)
    );

    CourseProfile {
        track_points,
        waypoints,
        sampled_track_points,
    }
}

/// Parse the raw XML, retrying once with minimal safe repairs
///
/// Exported GPX files in the wild are missing XML declarations or the
/// mandatory version attribute often enough that a strict single-pass
/// parse loses real courses.
fn parse_gpx(source: &str) -> Option<Gpx> {
    if let Ok(gpx) = gpx::read(Cursor::new(source.as_bytes())) {
        return Some(gpx);
    }

    let repaired = repair_source(source);
    match gpx::read(Cursor::new(repaired.as_bytes())) {
        Ok(gpx) => Some(gpx),
        Err(e) => {
            tracing::debug!("GPX parse failed after repair: {}", e);
            None
        }
    }
}

/// Repairs that only add boilerplate, never touch coordinate data
fn repair_source(source: &str) -> String {
    let mut repaired = source.trim_start().to_string();

    if !repaired.starts_with("<?xml") {
        repaired = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", repaired);
    }

    if let Some(start) = repaired.find("<gpx") {
        if let Some(end) = repaired[start..].find('>') {
            if !repaired[start..start + end].contains("version=") {
                repaired.insert_str(start + 4, " version=\"1.1\"");
            }
        }
    }

    repaired
}

/// All track points in document order; route points only when the file
/// has no tracks
fn course_points(gpx: &Gpx) -> Vec<&Waypoint> {
    let track_points: Vec<&Waypoint> = gpx
        .tracks
        .iter()
        .flat_map(|track| track.segments.iter())
        .flat_map(|segment| segment.points.iter())
        .collect();

    if !track_points.is_empty() {
        return track_points;
    }

    gpx.routes
        .iter()
        .flat_map(|route| route.points.iter())
        .collect()
}

/// Assign each point the running haversine total from the start
///
/// The resulting distances are non-decreasing along the sequence.
fn accumulate_distance(points: &[&Waypoint]) -> Vec<TrackPoint> {
    let mut out = Vec::with_capacity(points.len());
    let mut total_km = 0.0;
    let mut prev: Option<(f64, f64)> = None;

    for wp in points {
        let point = wp.point();
        let (lat, lon) = (point.y(), point.x());

        if let Some((prev_lat, prev_lon)) = prev {
            total_km += haversine_distance(prev_lat, prev_lon, lat, lon);
        }
        prev = Some((lat, lon));

        out.push(TrackPoint {
            distance_km: total_km,
            elevation_m: wp.elevation.unwrap_or(0.0),
            lat,
            lon,
        });
    }

    out
}

/// Match each declared waypoint to the globally nearest track point
///
/// This is a plain nearest-neighbor scan over the full-resolution
/// track, not a path projection: on loop or out-and-back courses a
/// waypoint can match the wrong leg. Known, accepted behavior.
fn match_waypoints(declared: &[Waypoint], track: &[TrackPoint]) -> Vec<CourseWaypoint> {
    if track.is_empty() {
        return Vec::new();
    }

    let mut matched: Vec<CourseWaypoint> = declared
        .iter()
        .filter_map(|wp| {
            let point = wp.point();
            let (lat, lon) = (point.y(), point.x());

            let nearest = track.iter().min_by(|a, b| {
                let da = haversine_distance(lat, lon, a.lat, a.lon);
                let db = haversine_distance(lat, lon, b.lat, b.lon);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })?;

            Some(CourseWaypoint {
                name: wp.name.clone().unwrap_or_default(),
                distance_km: nearest.distance_km,
                elevation_m: nearest.elevation_m,
            })
        })
        .collect();

    matched.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    matched
}

/// Downsample a track to at most `max_points` strided picks plus the
/// original final point
///
/// Picks use floored indices `i * len / max_points`, so the stride is
/// uniform and the final point may duplicate the last pick.
pub fn sample_track(points: &[TrackPoint], max_points: usize) -> Vec<TrackPoint> {
    if max_points == 0 || points.len() <= max_points {
        return points.to_vec();
    }

    let len = points.len();
    let mut sampled: Vec<TrackPoint> = (0..max_points).map(|i| points[i * len / max_points]).collect();
    sampled.push(points[len - 1]);

    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gpx_with_track() -> String {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <wpt lat="0.0" lon="0.02"><name>Water Station</name></wpt>
  <wpt lat="0.0" lon="0.0"><name>Start</name></wpt>
  <trk><trkseg>
    <trkpt lat="0.0" lon="0.00"><ele>10.0</ele></trkpt>
    <trkpt lat="0.0" lon="0.01"><ele>12.0</ele></trkpt>
    <trkpt lat="0.0" lon="0.02"><ele>15.0</ele></trkpt>
    <trkpt lat="0.0" lon="0.03"><ele>11.0</ele></trkpt>
    <trkpt lat="0.0" lon="0.04"></trkpt>
  </trkseg></trk>
</gpx>"#
            .to_string()
    }

    #[test]
    fn test_parse_track_distance_monotonic() {
        let profile = parse_course(&gpx_with_track());

        assert_eq!(profile.track_points.len(), 5);
        for pair in profile.track_points.windows(2) {
            assert!(pair[1].distance_km >= pair[0].distance_km);
        }
        assert_eq!(profile.track_points[0].distance_km, 0.0);
        // Missing elevation defaults to 0
        assert_eq!(profile.track_points[4].elevation_m, 0.0);
        // ~0.04 degrees of longitude at the equator
        assert!((profile.total_distance_km() - 4.45).abs() < 0.1);
    }

    #[test]
    fn test_waypoints_matched_and_sorted() {
        let profile = parse_course(&gpx_with_track());

        assert_eq!(profile.waypoints.len(), 2);
        // Declared out of course order; matched distances sort them
        assert_eq!(profile.waypoints[0].name, "Start");
        assert_eq!(profile.waypoints[0].distance_km, 0.0);
        assert_eq!(profile.waypoints[1].name, "Water Station");
        assert!((profile.waypoints[1].distance_km - 2.22).abs() < 0.05);
        assert_eq!(profile.waypoints[1].elevation_m, 15.0);
    }

    #[test]
    fn test_route_point_fallback() {
        let source = r#"<?xml version="1.0"?>
<gpx version="1.1" creator="test">
  <rte>
    <rtept lat="0.0" lon="0.0"><ele>5.0</ele></rtept>
    <rtept lat="0.0" lon="0.01"><ele>6.0</ele></rtept>
  </rte>
</gpx>"#;

        let profile = parse_course(source);

        assert_eq!(profile.track_points.len(), 2);
        assert!(profile.track_points[1].distance_km > 1.0);
    }

    #[test]
    fn test_malformed_source_degrades_to_empty() {
        let profile = parse_course("not xml at all");
        assert!(profile.track_points.is_empty());
        assert!(profile.waypoints.is_empty());
        assert!(profile.sampled_track_points.is_empty());
    }

    #[test]
    fn test_missing_declaration_repaired() {
        let source = r#"<gpx version="1.1" creator="test">
  <trk><trkseg>
    <trkpt lat="1.0" lon="1.0"><ele>2.0</ele></trkpt>
    <trkpt lat="1.0" lon="1.01"><ele>3.0</ele></trkpt>
  </trkseg></trk>
</gpx>"#;

        let profile = parse_course(source);
        assert_eq!(profile.track_points.len(), 2);
    }

    #[test]
    fn test_sampling_bounds_and_final_point() {
        let points: Vec<TrackPoint> = (0..1000)
            .map(|i| TrackPoint {
                distance_km: i as f64 * 0.01,
                elevation_m: 100.0,
                lat: 0.0,
                lon: i as f64 * 0.0001,
            })
            .collect();

        let sampled = sample_track(&points, MAX_CHART_POINTS);

        assert!(sampled.len() <= MAX_CHART_POINTS + 1);
        let last = sampled.last().unwrap();
        assert_eq!(last.distance_km, points[999].distance_km);
    }

    #[test]
    fn test_sampling_short_track_unchanged() {
        let points: Vec<TrackPoint> = (0..150)
            .map(|i| TrackPoint {
                distance_km: i as f64,
                elevation_m: 0.0,
                lat: 0.0,
                lon: 0.0,
            })
            .collect();

        let sampled = sample_track(&points, MAX_CHART_POINTS);
        assert_eq!(sampled.len(), 150);
    }

    #[test]
    fn test_waypoint_matches_globally_nearest_point() {
        // Track doubles back: the waypoint near the start is also near
        // the end by index, but point 1 is the true nearest.
        let track = vec![
            TrackPoint { distance_km: 0.0, elevation_m: 0.0, lat: 0.0, lon: 0.0 },
            TrackPoint { distance_km: 1.1, elevation_m: 5.0, lat: 0.01, lon: 0.0 },
            TrackPoint { distance_km: 2.2, elevation_m: 0.0, lat: 0.02, lon: 0.0 },
        ];
        let mut wp = Waypoint::new(geo_types::Point::new(0.0, 0.0101));
        wp.name = Some("CP".to_string());

        let matched = match_waypoints(&[wp], &track);

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].distance_km, 1.1);
        assert_eq!(matched[0].elevation_m, 5.0);
    }
}
