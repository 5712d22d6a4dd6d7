//! The fixed catalog of node kinds.
//!
//! Every node in a diagram is one of the [`NodeKind`]s listed here. A kind
//! knows which provider and category it belongs to, the class name used for
//! auto-labelling, and where its icon lives inside an icon directory laid out
//! as `<provider>/<category>/<icon>.png`.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::error::UnknownVariant;

/// Infrastructure vendor a node kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Aws,
    OnPrem,
}

impl Provider {
    /// Directory name of the provider inside an icon directory.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::OnPrem => "onprem",
        }
    }
}

/// Functional group of a node kind.
///
/// Categories drive the built-in styling used when no icon is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Client,
    Compute,
    Database,
    Network,
    Storage,
}

impl Category {
    /// Directory name of the category inside a provider's icon directory.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Compute => "compute",
            Self::Database => "database",
            Self::Network => "network",
            Self::Storage => "storage",
        }
    }

    /// Graphviz shape used when the node is drawn without an icon.
    pub fn fallback_shape(self) -> &'static str {
        match self {
            Self::Database => "cylinder",
            Self::Storage => "folder",
            Self::Client | Self::Compute | Self::Network => "box",
        }
    }

    /// Fill color used when the node is drawn without an icon.
    pub fn fallback_fill(self) -> &'static str {
        match self {
            Self::Client => "#5A6B7B",
            Self::Compute => "#ED7100",
            Self::Database => "#C925D1",
            Self::Network => "#8C4FFF",
            Self::Storage => "#7AA116",
        }
    }
}

/// A kind of node that can be placed on a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Client,
    Users,
    Route53,
    CloudFront,
    ApiGateway,
    Vpc,
    ElasticLoadBalancing,
    Lambda,
    Ec2,
    Dynamodb,
    Rds,
    SimpleStorageServiceS3,
    S3Glacier,
}

impl NodeKind {
    /// All kinds in catalog order.
    pub const ALL: [NodeKind; 13] = [
        Self::Client,
        Self::Users,
        Self::Route53,
        Self::CloudFront,
        Self::ApiGateway,
        Self::Vpc,
        Self::ElasticLoadBalancing,
        Self::Lambda,
        Self::Ec2,
        Self::Dynamodb,
        Self::Rds,
        Self::SimpleStorageServiceS3,
        Self::S3Glacier,
    ];

    pub fn provider(self) -> Provider {
        match self {
            Self::Client | Self::Users => Provider::OnPrem,
            _ => Provider::Aws,
        }
    }

    pub fn category(self) -> Category {
        match self {
            Self::Client | Self::Users => Category::Client,
            Self::Route53
            | Self::CloudFront
            | Self::ApiGateway
            | Self::Vpc
            | Self::ElasticLoadBalancing => Category::Network,
            Self::Lambda | Self::Ec2 => Category::Compute,
            Self::Dynamodb | Self::Rds => Category::Database,
            Self::SimpleStorageServiceS3 | Self::S3Glacier => Category::Storage,
        }
    }

    /// Class name of the kind, used as the label prefix when auto-labelling.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Users => "Users",
            Self::Route53 => "Route53",
            Self::CloudFront => "CloudFront",
            Self::ApiGateway => "APIGateway",
            Self::Vpc => "VPC",
            Self::ElasticLoadBalancing => "ElasticLoadBalancing",
            Self::Lambda => "Lambda",
            Self::Ec2 => "EC2",
            Self::Dynamodb => "Dynamodb",
            Self::Rds => "RDS",
            Self::SimpleStorageServiceS3 => "SimpleStorageServiceS3",
            Self::S3Glacier => "S3Glacier",
        }
    }

    /// File stem of the kind's icon.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Users => "users",
            Self::Route53 => "route-53",
            Self::CloudFront => "cloudfront",
            Self::ApiGateway => "api-gateway",
            Self::Vpc => "vpc",
            Self::ElasticLoadBalancing => "elastic-load-balancing",
            Self::Lambda => "lambda",
            Self::Ec2 => "ec2",
            Self::Dynamodb => "dynamodb",
            Self::Rds => "rds",
            Self::SimpleStorageServiceS3 => "simple-storage-service-s3",
            Self::S3Glacier => "s3-glacier",
        }
    }

    /// Location of the kind's icon below `icons_dir`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use cloudsketch_core::catalog::NodeKind;
    ///
    /// let path = NodeKind::Lambda.icon_path(Path::new("icons"));
    /// assert_eq!(path, Path::new("icons/aws/compute/lambda.png"));
    /// ```
    pub fn icon_path(self, icons_dir: &Path) -> PathBuf {
        icons_dir
            .join(self.provider().as_str())
            .join(self.category().as_str())
            .join(format!("{}.png", self.icon()))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

impl FromStr for NodeKind {
    type Err = UnknownVariant;

    /// Accepts the class name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.class_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|kind| kind.class_name()).collect();
                UnknownVariant::new("node kind", s, &names)
            })
    }
}
