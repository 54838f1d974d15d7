use std::{io::Write, path::Path};

use ahash::AHashMap;
use anyhow::{anyhow, Context, Result};
use geo::{Coord, InteriorPoint, Rect};

use crate::{
    data::FeatureKey,
    io::svg::{create_svg_file, escape, multipolygon_to_path, write_svg_footer, write_svg_header, write_svg_styles, Projection},
    style::{Legend, PathStyle},
};
use super::surface::{DrawTarget, LayerId, LayerKind, LayerSpec, LayerToggle, MapSurface, Marker, PolygonShape, Popup};

#[derive(Debug)]
struct SvgLayer {
    id: LayerId,
    spec: LayerSpec,
    markers: Vec<Marker>,
    tooltips: AHashMap<FeatureKey, Popup>,
}

#[derive(Clone, Copy, Debug)]
enum View {
    Bounds(Rect<f64>),
    Center(Coord<f64>, u8),
}

/// A [`MapSurface`] that keeps the drawn state in memory and exports it as a
/// standalone SVG document.
#[derive(Debug)]
pub struct SvgMapSurface {
    width: f64,
    margin: f64,
    next_id: u32,
    layers: Vec<SvgLayer>,
    view: View,
    control: Vec<LayerToggle>,
    legend: Option<Legend>,
}

impl SvgMapSurface {
    pub fn new(width: u32, margin: u32) -> Self {
        Self {
            width: width as f64,
            margin: margin as f64,
            next_id: 0,
            layers: Vec::new(),
            view: View::Center(Coord { x: 0.0, y: 0.0 }, 2),
            control: Vec::new(),
            legend: None,
        }
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut SvgLayer> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }

    /// Layer names in draw order, bottom first.
    pub fn layer_order(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.spec.name.as_str()).collect()
    }

    #[inline] pub fn layer_control(&self) -> &[LayerToggle] { &self.control }

    #[inline] pub fn legend(&self) -> Option<&Legend> { self.legend.as_ref() }

    /// Geographic extent currently shown.
    pub fn extent(&self) -> Rect<f64> {
        match self.view {
            View::Bounds(bounds) => bounds,
            View::Center(center, zoom) => {
                // Web-map convention: 256px tiles covering 360 degrees at zoom 0.
                let half = self.width * 360.0 / (256.0 * 2f64.powi(zoom as i32)) / 2.0;
                Rect::new(
                    Coord { x: center.x - half, y: center.y - half * 0.75 },
                    Coord { x: center.x + half, y: center.y + half * 0.75 },
                )
            }
        }
    }

    /// Render the current state to an SVG string.
    pub fn to_svg_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_svg(&mut buffer)?;
        String::from_utf8(buffer).context("[to_svg] SVG output is not valid UTF-8")
    }

    /// Render the current state to an SVG file.
    pub fn to_svg(&self, path: &Path) -> Result<()> {
        let mut writer = create_svg_file(path)?;
        self.write_svg(&mut writer)?;
        writer.flush().with_context(|| format!("[to_svg] Failed to write {}", path.display()))
    }

    fn write_svg(&self, writer: &mut impl Write) -> Result<()> {
        let bounds = self.extent();
        if !(bounds.width() > 0.0 || bounds.height() > 0.0) {
            return Err(anyhow!("[to_svg] Could not determine bounds; nothing to draw."));
        }

        let margin = self.margin;
        let width = self.width;
        let span = if bounds.width() > 0.0 { bounds.width() } else { bounds.height() };
        let scale = (width - 2.0 * margin) / span;
        let height = (bounds.height() * scale + 2.0 * margin).max(2.0 * margin + 1.0);

        // --- Map lon/lat -> SVG coords (preserve aspect, Y down) ---
        let project = move |coord: &Coord<f64>| -> (f64, f64) {
            let x = margin + (coord.x - bounds.min().x) * scale;
            let y = margin + (bounds.max().y - coord.y) * scale; // invert vertically
            (x, y)
        };

        write_svg_header(writer, width, height, &bounds)?;
        write_svg_styles(writer)?;

        for layer in &self.layers {
            write_layer(writer, layer, &project)?;
        }
        if let Some(legend) = &self.legend {
            write_legend(writer, legend, height)?;
        }

        write_svg_footer(writer)
    }
}

fn style_attr(style: &PathStyle) -> String {
    let mut out = format!(
        "fill:{};fill-opacity:{};stroke:{};stroke-width:{};stroke-opacity:{}",
        style.fill_color, style.fill_opacity, style.color, style.weight, style.opacity,
    );
    if !style.dash_array.is_empty() { out.push_str(&format!(";stroke-dasharray:{}", style.dash_array)) }
    out
}

fn popup_text(popup: &Popup) -> String {
    popup.title.iter().cloned()
        .chain(popup.rows.iter().map(|(label, value)| format!("{label}: {value}")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_layer(writer: &mut impl Write, layer: &SvgLayer, project: &Projection) -> Result<()> {
    let class = match layer.spec.kind {
        LayerKind::Regions => "regions",
        LayerKind::Boundaries => "boundaries",
        LayerKind::Points => "points",
    };
    let events = if layer.spec.interactive { "" } else { r#" pointer-events="none""# };
    writeln!(writer, r#"<g id="layer-{}" class="{class}" data-name="{}"{events}>"#, layer.id.0, escape(&layer.spec.name))?;

    for shape in &layer.spec.shapes {
        write_shape(writer, shape, layer.tooltips.get(&shape.key), project)?;
    }
    for shape in layer.spec.shapes.iter().filter(|s| s.label.is_some()) {
        if let (Some(label), Some(point)) = (&shape.label, shape.geometry.interior_point()) {
            let (x, y) = project(&point.0);
            writeln!(writer, r#"<text class="label" x="{x:.3}" y="{y:.3}">{}</text>"#, escape(label))?;
        }
    }
    for marker in &layer.markers {
        let (x, y) = project(&marker.position.0);
        let s = &marker.style;
        writeln!(writer,
            r#"<circle cx="{x:.3}" cy="{y:.3}" r="{}" style="fill:{};fill-opacity:{};stroke:{};stroke-width:{}"><title>{}</title></circle>"#,
            s.radius, s.fill_color, s.fill_opacity, s.color, s.weight, escape(&popup_text(&marker.popup)),
        )?;
    }

    writeln!(writer, "</g>")?;
    Ok(())
}

fn write_shape(writer: &mut impl Write, shape: &PolygonShape, tooltip: Option<&Popup>, project: &Projection) -> Result<()> {
    let d = multipolygon_to_path(&shape.geometry, project);
    match tooltip {
        Some(popup) => writeln!(writer,
            r#"<path data-key="{}" d="{d}" style="{}"><title>{}</title></path>"#,
            shape.key, style_attr(&shape.style), escape(&popup_text(popup)),
        )?,
        None => writeln!(writer, r#"<path data-key="{}" d="{d}" style="{}"/>"#, shape.key, style_attr(&shape.style))?,
    }
    Ok(())
}

fn write_legend(writer: &mut impl Write, legend: &Legend, height: f64) -> Result<()> {
    let rows = legend.entries.len() as f64 + 1.0;
    let top = height - 10.0 - rows * 18.0;
    writeln!(writer, r#"<g class="legend" transform="translate(10,{top:.1})">"#)?;
    writeln!(writer, r##"<rect x="-4" y="-14" width="240" height="{:.1}" fill="#ffffff" fill-opacity="0.9"/>"##, rows * 18.0 + 8.0)?;
    writeln!(writer, r#"<text class="title" x="0" y="0">{}</text>"#, escape(&legend.title))?;
    for (i, entry) in legend.entries.iter().enumerate() {
        let y = (i as f64 + 1.0) * 18.0;
        let stroke = if entry.outlined { "#000000" } else { "none" };
        writeln!(writer, r#"<rect x="0" y="{:.1}" width="14" height="12" fill="{}" stroke="{stroke}"/>"#, y - 10.0, entry.color)?;
        writeln!(writer, r#"<text x="20" y="{y:.1}">{}</text>"#, escape(&entry.label))?;
    }
    writeln!(writer, "</g>")?;
    Ok(())
}

impl MapSurface for SvgMapSurface {
    fn add_layer(&mut self, layer: LayerSpec) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.push(SvgLayer { id, spec: layer, markers: Vec::new(), tooltips: AHashMap::new() });
        id
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.layers.retain(|l| l.id != layer);
    }

    fn clear_layer(&mut self, layer: LayerId) {
        if let Some(l) = self.layer_mut(layer) {
            l.spec.shapes.clear();
            l.markers.clear();
            l.tooltips.clear();
        }
    }

    fn add_markers(&mut self, layer: LayerId, markers: Vec<Marker>) {
        if let Some(l) = self.layer_mut(layer) { l.markers.extend(markers) }
    }

    fn set_feature_style(&mut self, layer: LayerId, feature: FeatureKey, style: &PathStyle) {
        if let Some(shape) = self.layer_mut(layer)
            .and_then(|l| l.spec.shapes.iter_mut().find(|s| s.key == feature))
        {
            shape.style = style.clone();
        }
    }

    fn open_tooltip(&mut self, layer: LayerId, feature: FeatureKey, content: &Popup) {
        if let Some(l) = self.layer_mut(layer) { l.tooltips.insert(feature, content.clone()); }
    }

    fn close_tooltip(&mut self, layer: LayerId, feature: FeatureKey) {
        if let Some(l) = self.layer_mut(layer) { l.tooltips.remove(&feature); }
    }

    fn bring_to_front(&mut self, target: DrawTarget) {
        match target {
            DrawTarget::Layer(id) => {
                if let Some(pos) = self.layers.iter().position(|l| l.id == id) {
                    let layer = self.layers.remove(pos);
                    self.layers.push(layer);
                }
            }
            DrawTarget::Feature(id, feature) => {
                if let Some(l) = self.layer_mut(id) {
                    if let Some(pos) = l.spec.shapes.iter().position(|s| s.key == feature) {
                        let shape = l.spec.shapes.remove(pos);
                        l.spec.shapes.push(shape);
                    }
                }
            }
        }
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>) {
        self.view = View::Bounds(bounds);
    }

    fn set_view(&mut self, center: Coord<f64>, zoom: u8) {
        self.view = View::Center(center, zoom);
    }

    fn set_layer_control(&mut self, entries: &[LayerToggle]) {
        self.control = entries.to_vec();
    }

    fn set_legend(&mut self, legend: &Legend) {
        self.legend = Some(legend.clone());
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, Coord, MultiPolygon};

    use super::SvgMapSurface;
    use crate::{
        map::surface::{DrawTarget, LayerKind, LayerSpec, MapSurface, PolygonShape},
        style::PathStyle,
    };

    fn layer(name: &str, kind: LayerKind, interactive: bool) -> LayerSpec {
        let geometry = MultiPolygon(vec![polygon![(x: 99.0, y: 2.0), (x: 99.5, y: 2.0), (x: 99.5, y: 2.5)]]);
        LayerSpec {
            name: name.into(),
            kind,
            interactive,
            shapes: vec![PolygonShape { key: 0, geometry, style: PathStyle::boundary(), label: Some("Alpha".into()) }],
        }
    }

    #[test]
    fn non_interactive_layers_ignore_pointer_events() {
        let mut svg = SvgMapSurface::new(400, 10);
        svg.add_layer(layer("regions", LayerKind::Regions, true));
        svg.add_layer(layer("outline", LayerKind::Boundaries, false));
        svg.set_view(Coord { x: 99.5, y: 2.0 }, 8);

        let text = svg.to_svg_string().unwrap();
        assert!(text.contains(r#"class="boundaries" data-name="outline" pointer-events="none""#));
        assert!(!text.contains(r#"data-name="regions" pointer-events"#));
        assert!(text.contains(">Alpha</text>"));
    }

    #[test]
    fn bring_to_front_reorders_layers() {
        let mut svg = SvgMapSurface::new(400, 10);
        let a = svg.add_layer(layer("a", LayerKind::Regions, true));
        svg.add_layer(layer("b", LayerKind::Boundaries, false));
        svg.bring_to_front(DrawTarget::Layer(a));
        assert_eq!(svg.layer_order(), ["b", "a"]);

        svg.remove_layer(a);
        assert_eq!(svg.layer_order(), ["b"]);
    }
}
