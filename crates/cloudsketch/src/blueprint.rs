//! Ready-made diagrams.

use log::debug;

use cloudsketch_core::{
    catalog::NodeKind,
    semantic::{Canvas, Diagram, Flow},
};

/// Title of the [`image_sharing_service`] diagram.
pub const IMAGE_SHARING_SERVICE: &str = "Image Sharing Service";

/// AWS topology of the image sharing web service.
///
/// Clients resolve the service through Route 53 and reach it through
/// CloudFront and API Gateway. Go route handlers run as Lambda functions
/// inside the VPC, keep album metadata in DynamoDB, read images from S3 and
/// move expired images to Glacier.
///
/// Renders to `image_sharing_service.png`.
pub fn image_sharing_service() -> Diagram {
    let mut canvas = Canvas::new(IMAGE_SHARING_SERVICE);

    let client = canvas.node(NodeKind::Client, "Client");
    let dns = canvas.node(NodeKind::Route53, "DNS");
    let cdn = canvas.node(NodeKind::CloudFront, "CDN");
    let gateway = canvas.node(NodeKind::ApiGateway, "API Gateway");

    let (handlers, ddb, s3, s3g) = canvas.cluster("VPC", |vpc| {
        (
            vpc.node(NodeKind::Lambda, "Route Handlers (Go)"),
            vpc.node(NodeKind::Dynamodb, "Album Metadata"),
            vpc.node(NodeKind::SimpleStorageServiceS3, "Images"),
            vpc.node(NodeKind::S3Glacier, "Expired Images"),
        )
    });

    canvas
        .flow(Flow::start(client).forward(dns))
        .flow(Flow::start(client).forward(cdn))
        .flow(Flow::start(cdn).undirected(gateway).undirected(handlers))
        .flow(Flow::start(handlers).undirected(ddb))
        .flow(Flow::start(handlers).backward(s3).forward(s3g))
        .flow(Flow::start(handlers).backward(s3g));

    let diagram = canvas.finish();
    debug!(
        nodes = diagram.nodes().len(),
        statements = diagram.flows().len();
        "Image sharing service declared"
    );
    diagram
}

#[cfg(test)]
mod tests {
    use cloudsketch_core::semantic::EdgeDirection;

    use super::*;

    #[test]
    fn test_filename_from_title() {
        let diagram = image_sharing_service();

        assert_eq!(diagram.title(), IMAGE_SHARING_SERVICE);
        assert_eq!(diagram.output_file_names(), vec!["image_sharing_service.png"]);
    }

    #[test]
    fn test_chain_statements_expand() {
        let diagram = image_sharing_service();

        assert_eq!(diagram.flows().len(), 6);
        assert_eq!(diagram.edge_count(), 8);

        let storage = &diagram.flows()[4];
        let directions: Vec<EdgeDirection> =
            storage.hops().iter().map(|(link, _)| link.direction()).collect();
        assert_eq!(
            directions,
            vec![EdgeDirection::Backward, EdgeDirection::Forward]
        );
    }
}
