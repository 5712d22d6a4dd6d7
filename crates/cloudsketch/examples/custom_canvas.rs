//! Example: Declaring a diagram with the canvas API
//!
//! This example builds a small serverless topology, prints its Graphviz
//! source and, when Graphviz is installed, renders it to SVG in the
//! current directory.

use cloudsketch::{
    DiagramRenderer, SketchError,
    catalog::NodeKind,
    color::Color,
    config::AppConfig,
    semantic::{Canvas, Direction, Flow, LineStyle, Link, OutputFormat},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building diagram with the canvas API...\n");

    let mut canvas = Canvas::new("Thumbnail Pipeline")
        .with_direction(Direction::TopBottom)
        .with_output_formats([OutputFormat::Svg])
        .with_autolabel(true);

    // Nodes outside any cluster
    let users = canvas.node(NodeKind::Users, "Uploaders");
    let cdn = canvas.node(NodeKind::CloudFront, "CDN");

    // Nodes declared inside the closure belong to the cluster
    let (resize, originals, thumbs) = canvas.cluster("Processing", |processing| {
        (
            processing.node(NodeKind::Lambda, "Resize"),
            processing.node(NodeKind::SimpleStorageServiceS3, "Originals"),
            processing.node(NodeKind::SimpleStorageServiceS3, "Thumbnails"),
        )
    });

    let trigger = Link::forward()
        .with_label("ObjectCreated")
        .with_color(Color::new("orange")?)
        .with_style(LineStyle::Dashed);

    canvas
        .flow(Flow::start(users).forward(originals))
        .flow(Flow::start(originals).hop(trigger, resize).forward(thumbs))
        .flow(Flow::start(cdn).backward(thumbs));

    let diagram = canvas.finish();
    println!(
        "Declared {} nodes, {} clusters and {} edges",
        diagram.nodes().len(),
        diagram.clusters().len(),
        diagram.edge_count()
    );

    let renderer = DiagramRenderer::new(AppConfig::default());
    println!("\n{}", renderer.to_dot(&diagram)?);

    match renderer.render_to_dir(&diagram, ".") {
        Ok(written) => {
            for path in written {
                println!("Wrote {}", path.display());
            }
        }
        Err(SketchError::EngineUnavailable { program }) => {
            println!("Graphviz (`{program}`) is not installed, skipping render");
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
