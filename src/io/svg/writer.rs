use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};

pub(crate) fn create_svg_file(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("[io::svg] Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Write the XML declaration, the opening <svg> tag (with the geographic extent
/// as data attributes) and a background.
pub(crate) fn write_svg_header<W: Write>(writer: &mut W, width: f64, height: f64, bounds: &geo::Rect) -> Result<()> {
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg"
        width="{width}" height="{height}"
        viewBox="0 0 {width} {height}"
        data-lon-min="{lon_min}" data-lon-max="{lon_max}"
        data-lat-min="{lat_min}" data-lat-max="{lat_max}">"##,
        lon_min = bounds.min().x,
        lon_max = bounds.max().x,
        lat_min = bounds.min().y,
        lat_max = bounds.max().y,
    )?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#dbe4ea"/>"##)?;
    Ok(())
}

/// Write shared styles for layers, labels and the legend.
pub(crate) fn write_svg_styles<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, r##"<defs>
<style>
    .regions path {{ vector-effect: non-scaling-stroke; }}
    .boundaries path {{ vector-effect: non-scaling-stroke; }}
    .label {{ font: bold 12px sans-serif; text-anchor: middle; dominant-baseline: middle; paint-order: stroke; stroke: #ffffff; stroke-width: 2px; }}
    .legend {{ font: 11px sans-serif; }}
    .legend .title {{ font-weight: bold; }}
</style>
</defs>"##)?;
    Ok(())
}

/// Write the closing </svg> tag.
pub(crate) fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}
