//! Complete workflow demonstration for voronoi_jewelry
//!
//! Run with `RUST_LOG=debug` to see pipeline timings.

use voronoi_jewelry::*;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    println!("=== voronoi_jewelry Earring Demo ===\n");

    // Step 1: Configure the design
    println!("Step 1: Configuring design...");
    let params = DesignParamsBuilder::new()
        .gap_width(1.5)?
        .hole_diameter(2.0)?
        .corner_radius(0.0)?
        .build();
    println!("  Gap width: {}", params.gap_width);
    println!("  Hole diameter: {}", params.hole_diameter);

    // Step 2: Place sites, a teardrop outline with a few inner points
    println!("\nStep 2: Placing sites...");
    let mut session = DesignSession::new(params);
    let outline = [
        (50.0, 5.0),
        (75.0, 30.0),
        (85.0, 60.0),
        (70.0, 90.0),
        (50.0, 98.0),
        (30.0, 90.0),
        (15.0, 60.0),
        (25.0, 30.0),
    ];
    let inner = [
        (50.0, 30.0),
        (40.0, 50.0),
        (62.0, 52.0),
        (45.0, 72.0),
        (58.0, 75.0),
        (52.0, 55.0),
    ];
    for (x, y) in outline.iter().chain(inner.iter()) {
        session.add_site(Point::new(*x, *y));
    }
    println!("  {} sites", session.sites().len());
    println!("  {} interior cells", session.result().cell_count());

    // Step 3: Punch the mounting hole near the top
    println!("\nStep 3: Placing hole...");
    session.set_mode(EditMode::PlaceHole);
    session.click(Point::new(50.0, 25.0));
    println!("  Hole included: {}", session.result().hole_included());

    // Step 4: Spread the inner sites
    println!("\nStep 4: Spreading sites...");
    let moved = session.spread_points(SpreadOptions::default());
    println!("  Sites moved: {}", moved);
    println!("  {} interior cells", session.result().cell_count());
    if !session.result().hole_included() {
        println!("  (hole fell outside the design after spreading)");
    }

    // Step 5: Round the corners; only the paths are rebuilt
    println!("\nStep 5: Rounding corners...");
    session.set_corner_radius(1.5)?;
    let quads: usize = session
        .result()
        .display_commands
        .iter()
        .flatten()
        .filter(|c| matches!(c, PathCommand::QuadTo { .. }))
        .count();
    println!("  {} rounded corners", quads);

    // Step 6: Export
    println!("\nStep 6: Exporting SVG...");
    if !session.can_export() {
        println!("  Nothing to export");
        return Ok(());
    }
    let svg = session.export_svg(&SvgOptions::default());
    println!("{}\n", svg);

    let silhouette = session.export_svg(&SvgOptions {
        layer: ExportLayer::Silhouette,
        style: SvgStyle::preview(),
    });
    println!("Silhouette preview ({} bytes)", silhouette.as_str().len());

    println!("\n=== Demo Complete ===");
    Ok(())
}
