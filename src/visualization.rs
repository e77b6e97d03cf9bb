//! SVG rendering of computed routes.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::instance::TourInstance;
use crate::tour::Route;

/// SVG route renderer. Plots places in lon/lat space with the route drawn
/// as directed edges; the first visited place is highlighted.
pub struct Visualizer {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Margin
    pub margin: f64,
    /// Place marker radius
    pub node_radius: f64,
}

impl Default for Visualizer {
    fn default() -> Self {
        Visualizer {
            width: 800.0,
            height: 600.0,
            margin: 50.0,
            node_radius: 6.0,
        }
    }
}

impl Visualizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn bounds(&self, instance: &TourInstance) -> (f64, f64, f64, f64) {
        let mut min_lon = f64::INFINITY;
        let mut max_lon = f64::NEG_INFINITY;
        let mut min_lat = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        for place in &instance.places {
            min_lon = min_lon.min(place.lon);
            max_lon = max_lon.max(place.lon);
            min_lat = min_lat.min(place.lat);
            max_lat = max_lat.max(place.lat);
        }
        (min_lon, max_lon, min_lat, max_lat)
    }

    /// Generate the SVG document for a route.
    pub fn generate_svg(&self, instance: &TourInstance, route: &Route) -> String {
        let mut svg = String::new();

        svg.push_str(&format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
<style>
    .place {{ fill: #3498db; stroke: #2c3e50; stroke-width: 2; }}
    .start {{ fill: #e74c3c; stroke: #c0392b; stroke-width: 2; }}
    .edge {{ stroke: #34495e; stroke-width: 2; fill: none; }}
    .label {{ font-family: Arial; font-size: 10px; fill: #2c3e50; }}
    .title {{ font-family: Arial; font-size: 14px; fill: #2c3e50; font-weight: bold; }}
</style>
<rect width="100%" height="100%" fill="#ecf0f1"/>
"##,
            self.width, self.height, self.width, self.height
        ));

        svg.push_str(&format!(
            r#"<text x="{}" y="25" class="title">Route: {} places | {:.2} km</text>
"#,
            self.margin,
            instance.len(),
            route.length
        ));

        if instance.is_empty() {
            svg.push_str("</svg>");
            return svg;
        }

        let (min_lon, max_lon, min_lat, max_lat) = self.bounds(instance);
        let scale_x = (self.width - 2.0 * self.margin) / (max_lon - min_lon).max(1e-6);
        let scale_y = (self.height - 2.0 * self.margin) / (max_lat - min_lat).max(1e-6);
        let scale = scale_x.min(scale_y);

        // SVG's y axis grows downward; latitude grows upward.
        let transform = |lon: f64, lat: f64| -> (f64, f64) {
            let x = self.margin + (lon - min_lon) * scale;
            let y = self.height - self.margin - (lat - min_lat) * scale;
            (x, y)
        };

        svg.push_str(
            r##"<defs>
<marker id="arrow" markerWidth="10" markerHeight="10" refX="9" refY="3" orient="auto" markerUnits="strokeWidth">
<path d="M0,0 L0,6 L9,3 z" fill="#34495e"/>
</marker>
</defs>
"##,
        );

        for pair in route.path.windows(2) {
            let from = &instance.places[pair[0]];
            let to = &instance.places[pair[1]];
            let (x1, y1) = transform(from.lon, from.lat);
            let (x2, y2) = transform(to.lon, to.lat);
            svg.push_str(&format!(
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" class="edge" marker-end="url(#arrow)"/>
"#,
                x1, y1, x2, y2
            ));
        }

        for (index, place) in instance.places.iter().enumerate() {
            let (x, y) = transform(place.lon, place.lat);
            let class = if route.path.first() == Some(&index) {
                "start"
            } else {
                "place"
            };
            svg.push_str(&format!(
                r##"<circle cx="{:.2}" cy="{:.2}" r="{}" class="{}"/>
"##,
                x, y, self.node_radius, class
            ));
            svg.push_str(&format!(
                r##"<text x="{:.2}" y="{:.2}" class="label" text-anchor="middle">{}</text>
"##,
                x,
                y - self.node_radius - 3.0,
                place.name
            ));
        }

        svg.push_str("</svg>");
        svg
    }

    /// Render the route and write the SVG to a file.
    pub fn save_svg<P: AsRef<Path>>(
        &self,
        instance: &TourInstance,
        route: &Route,
        out: P,
    ) -> Result<()> {
        let svg = self.generate_svg(instance, route);
        let mut file = File::create(out)?;
        file.write_all(svg.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Place;
    use crate::matrix::DistanceMatrix;

    #[test]
    fn test_generate_svg_contains_route() {
        let instance = TourInstance::from_places(vec![
            Place::new("a", 48.85, 2.35),
            Place::new("b", 48.86, 2.29),
            Place::new("c", 48.84, 2.37),
        ])
        .unwrap();
        let route = Route::from_path(instance.matrix(), vec![1, 0, 2], "test").unwrap();
        let svg = Visualizer::new().generate_svg(&instance, &route);
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("class=\"start\""));
        assert_eq!(svg.matches("<line").count(), 2);
        assert!(svg.contains(">b</text>"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_generate_svg_empty_instance() {
        let instance = TourInstance::from_places(Vec::new()).unwrap();
        let matrix = DistanceMatrix::from_values(Vec::new()).unwrap();
        let route = Route::from_path(&matrix, Vec::new(), "test").unwrap();
        let svg = Visualizer::new().generate_svg(&instance, &route);
        assert!(svg.ends_with("</svg>"));
    }
}
