use heatmap_overlay::prelude::*;
use serde_json::json;

/// Renderer that only reports what it was asked to draw
struct ConsoleRenderer;

impl HeatmapRenderer for ConsoleRenderer {
    fn set_data(&mut self, data: &RenderData) {
        println!(
            "   🎨 {} points, min {:.1}, max {:.1}",
            data.data.len(),
            data.min,
            data.max
        );
        for point in data.data.iter().take(3) {
            println!(
                "      ({:>4}, {:>4}) value {:.1} radius {:.1}",
                point.x, point.y, point.value, point.radius
            );
        }
    }

    fn configure(&mut self, options: &RendererOptions) {
        println!("   ⚙️ configure {}", serde_json::Value::Object(options.clone()));
    }

    fn set_dimensions(&mut self, size: ContainerSize) {
        println!("   📐 resize to {}x{}", size.width, size.height);
    }
}

/// Example of driving a heatmap overlay over a headless map
fn main() -> anyhow::Result<()> {
    heatmap_overlay::init_logging();

    println!("🗺️ Heatmap Overlay Headless Example");
    println!("===================================");

    let map = Arc::new(HeadlessMap::new(
        LatLng::new(37.7749, -122.4194),
        12.0,
        ContainerSize::new(1024, 768),
    ));

    let config = HeatmapOverlayConfig::from_json(
        r#"{"radius": 0.002, "scaleRadius": true, "useLocalExtrema": true, "maxOpacity": 0.8}"#,
    )?;
    let factory: Arc<dyn RendererFactory> = Arc::new(
        |_: &OverlayContainer, _: &HeatmapOverlayConfig| -> Result<Box<dyn HeatmapRenderer>> {
            Ok(Box::new(ConsoleRenderer))
        },
    );
    let mut overlay = HeatmapOverlay::new(config, factory);

    println!("\n📌 Attaching before the first layout:");
    let outcome = overlay.attach(map.clone())?;
    println!("   {:?}", outcome);

    overlay.set_data(&HeatmapData::new(
        0.0,
        100.0,
        vec![
            json!({"lat": 37.7749, "lng": -122.4194, "value": 80}),
            json!({"lat": 37.7849, "lng": -122.4094, "value": 35}),
            json!({"lat": 37.7649, "lng": -122.4294, "value": 60, "radius": 0.004}),
            json!({"lat": 40.7128, "lng": -74.0060, "value": 100}),
        ],
    ))?;

    println!("\n🧭 Laying out the map:");
    map.layout();
    overlay.process_viewport_events();

    println!("\n🚀 Panning and zooming:");
    map.pan(Point::new(200.0, 0.0));
    map.set_view(LatLng::new(37.7749, -122.4194), 14.0);
    let handled = overlay.process_viewport_events();
    println!("   handled {} viewport changes", handled);

    println!("\n➕ Streaming in more points:");
    overlay.add_data(&json!([
        {"lat": 37.7750, "lng": -122.4180, "value": 120},
        {"lat": 37.7760, "lng": -122.4170, "value": -10}
    ]))?;
    let (min, max) = overlay.extrema();
    println!("   stored extrema now {:.1}..{:.1}", min, max);

    println!("\n📐 Resizing the map container:");
    map.set_size(ContainerSize::new(800, 600));
    overlay.on_resize();
    overlay.process_viewport_events();

    if let Some(container) = overlay.container() {
        println!("\n📦 Container transform: {}", container.css_transform());
    }

    overlay.detach();
    println!("\n✅ Overlay detached ({:?})", overlay.state());

    Ok(())
}
