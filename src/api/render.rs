//! HTML view of an asset's reduced demand.

use std::fmt::Write;

use super::types::AssetResponse;

/// Renders the asset page.
pub fn asset_page(asset: &AssetResponse) -> String {
    let name = escape(&asset.name);
    let mut rows = String::new();
    for (energy_type, demand) in &asset.energy_demand {
        // Writing to a String cannot fail.
        let _ = writeln!(
            rows,
            "      <tr><td>{}</td><td>{demand}</td></tr>",
            escape(energy_type)
        );
    }

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{name}: energy demand</title>
</head>
<body>
  <h1>{name}</h1>
  <table>
    <thead>
      <tr><th>Energy type</th><th>Reduced demand</th></tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
  <p>Total energy demand: <strong>{total}</strong></p>
  <p>Energy output reduction: <strong>{reduction}</strong></p>
</body>
</html>
"#,
        total = asset.total_energy_demand,
        reduction = escape(&asset.energy_output_reduction),
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
