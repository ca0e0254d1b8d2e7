/// All enums defined by the infragraph data model.
///
/// Each enum serializes to/from `snake_case` JSON strings. `NodeKindTag` and
/// `EdgeKindTag` additionally support provider-specific extension strings via
/// their `Extension` variant.
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Known resource kinds emitted by the infrastructure scanners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A concrete Terraform-managed resource (e.g. an instance or bucket).
    TerraformResource,
    /// A Terraform module call.
    TerraformModule,
    /// A Terraform input variable.
    TerraformVariable,
    /// A Terraform output value.
    TerraformOutput,
    /// A Helm chart definition.
    HelmChart,
    /// A deployed Helm release.
    HelmRelease,
    /// A raw Kubernetes manifest resource.
    KubernetesResource,
    /// A provider configuration block.
    Provider,
}

/// The `kind` field on a node: either a known [`ResourceKind`] or a
/// provider-specific extension string.
///
/// Scanners for niche providers emit kind strings this crate does not model;
/// any unknown string is accepted without error so that a newer scanner never
/// breaks an older engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKindTag {
    /// A resource kind recognised by this version of infragraph-core.
    Known(ResourceKind),
    /// A provider-specific or future kind not yet recognised by this crate.
    Extension(String),
}

impl NodeKindTag {
    /// Returns the `snake_case` string representation of the tag.
    ///
    /// For known variants this is a `&'static str` with no allocation.
    /// For extension variants the inner `String` is returned by reference.
    pub fn as_str(&self) -> &str {
        match self {
            NodeKindTag::Known(ResourceKind::TerraformResource) => "terraform_resource",
            NodeKindTag::Known(ResourceKind::TerraformModule) => "terraform_module",
            NodeKindTag::Known(ResourceKind::TerraformVariable) => "terraform_variable",
            NodeKindTag::Known(ResourceKind::TerraformOutput) => "terraform_output",
            NodeKindTag::Known(ResourceKind::HelmChart) => "helm_chart",
            NodeKindTag::Known(ResourceKind::HelmRelease) => "helm_release",
            NodeKindTag::Known(ResourceKind::KubernetesResource) => "kubernetes_resource",
            NodeKindTag::Known(ResourceKind::Provider) => "provider",
            NodeKindTag::Extension(s) => s.as_str(),
        }
    }
}

impl Default for NodeKindTag {
    /// Returns `NodeKindTag::Known(ResourceKind::TerraformResource)` as the
    /// sentinel default, so struct update syntax works in tests without
    /// specifying a kind.
    fn default() -> Self {
        Self::Known(ResourceKind::TerraformResource)
    }
}

impl AsRef<str> for NodeKindTag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Serialize for NodeKindTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NodeKindTag::Known(k) => k.serialize(serializer),
            NodeKindTag::Extension(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for NodeKindTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NodeKindTagVisitor;

        impl de::Visitor<'_> for NodeKindTagVisitor {
            type Value = NodeKindTag;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string representing a resource kind")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(match v {
                    "terraform_resource" => NodeKindTag::Known(ResourceKind::TerraformResource),
                    "terraform_module" => NodeKindTag::Known(ResourceKind::TerraformModule),
                    "terraform_variable" => NodeKindTag::Known(ResourceKind::TerraformVariable),
                    "terraform_output" => NodeKindTag::Known(ResourceKind::TerraformOutput),
                    "helm_chart" => NodeKindTag::Known(ResourceKind::HelmChart),
                    "helm_release" => NodeKindTag::Known(ResourceKind::HelmRelease),
                    "kubernetes_resource" => NodeKindTag::Known(ResourceKind::KubernetesResource),
                    "provider" => NodeKindTag::Known(ResourceKind::Provider),
                    other => NodeKindTag::Extension(other.to_owned()),
                })
            }
        }

        deserializer.deserialize_str(NodeKindTagVisitor)
    }
}

/// Known dependency kinds between scanned resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// An explicit `depends_on` declaration.
    DependsOn,
    /// An expression-level reference to another resource's attributes.
    References,
    /// A structural containment relationship (module → resource,
    /// chart → manifest).
    Contains,
    /// A module or chart import.
    Imports,
    /// A provider configuration supplying a resource.
    Provides,
}

/// The `kind` field on an edge: either a known [`DependencyKind`] or a
/// provider-specific extension string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeKindTag {
    /// A dependency kind recognised by this version of infragraph-core.
    Known(DependencyKind),
    /// A provider-specific or future kind not yet recognised by this crate.
    Extension(String),
}

impl EdgeKindTag {
    /// Returns the `snake_case` string representation of the tag.
    pub fn as_str(&self) -> &str {
        match self {
            EdgeKindTag::Known(DependencyKind::DependsOn) => "depends_on",
            EdgeKindTag::Known(DependencyKind::References) => "references",
            EdgeKindTag::Known(DependencyKind::Contains) => "contains",
            EdgeKindTag::Known(DependencyKind::Imports) => "imports",
            EdgeKindTag::Known(DependencyKind::Provides) => "provides",
            EdgeKindTag::Extension(s) => s.as_str(),
        }
    }
}

impl Default for EdgeKindTag {
    /// Returns `EdgeKindTag::Known(DependencyKind::DependsOn)` as the
    /// sentinel default.
    fn default() -> Self {
        Self::Known(DependencyKind::DependsOn)
    }
}

impl AsRef<str> for EdgeKindTag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Serialize for EdgeKindTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EdgeKindTag::Known(k) => k.serialize(serializer),
            EdgeKindTag::Extension(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for EdgeKindTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EdgeKindTagVisitor;

        impl de::Visitor<'_> for EdgeKindTagVisitor {
            type Value = EdgeKindTag;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string representing a dependency kind")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(match v {
                    "depends_on" => EdgeKindTag::Known(DependencyKind::DependsOn),
                    "references" => EdgeKindTag::Known(DependencyKind::References),
                    "contains" => EdgeKindTag::Known(DependencyKind::Contains),
                    "imports" => EdgeKindTag::Known(DependencyKind::Imports),
                    "provides" => EdgeKindTag::Known(DependencyKind::Provides),
                    other => EdgeKindTag::Extension(other.to_owned()),
                })
            }
        }

        deserializer.deserialize_str(EdgeKindTagVisitor)
    }
}

/// Severity classification of a blast-radius result.
///
/// Derived from the normalized impact score via [`Severity::from_score`];
/// ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// 80% or more of the rest of the graph is affected.
    Critical,
    /// At least 60% affected.
    High,
    /// At least 40% affected.
    Medium,
    /// At least 20% affected.
    Low,
    /// Less than 20% affected.
    Minimal,
}

impl Severity {
    /// Classifies a normalized impact score in `[0, 1]`.
    ///
    /// Thresholds: `>= 0.8` critical, `>= 0.6` high, `>= 0.4` medium,
    /// `>= 0.2` low, otherwise minimal. Values outside `[0, 1]` clamp to the
    /// nearest band rather than erroring.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Severity::Critical
        } else if score >= 0.6 {
            Severity::High
        } else if score >= 0.4 {
            Severity::Medium
        } else if score >= 0.2 {
            Severity::Low
        } else {
            Severity::Minimal
        }
    }

    /// Returns the canonical string form, matching the serialized value.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Minimal => "minimal",
        }
    }
}
