//! Layer rules and resolution of paths to the layer or crate they name.

use std::fmt;

/// Library name of the linted crate, as written in `use` paths.
pub(crate) const CRATE_NAME: &str = "merch_store";

/// A hexagonal layer of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Domain,
    Inbound,
    Outbound,
}

impl Layer {
    /// Module name of the layer under `backend/src`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "domain" => Some(Self::Domain),
            "inbound" => Some(Self::Inbound),
            "outbound" => Some(Self::Outbound),
            _ => None,
        }
    }

    /// Restrictions that apply to modules in this layer.
    pub fn rules(self) -> &'static LayerRules {
        match self {
            Self::Domain => &DOMAIN_RULES,
            Self::Inbound => &INBOUND_RULES,
            Self::Outbound => &OUTBOUND_RULES,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What one layer may not reach.
#[derive(Debug)]
pub struct LayerRules {
    pub layer: Layer,
    pub forbidden_layers: &'static [Layer],
    pub forbidden_crates: &'static [&'static str],
}

static DOMAIN_RULES: LayerRules = LayerRules {
    layer: Layer::Domain,
    forbidden_layers: &[Layer::Inbound, Layer::Outbound],
    forbidden_crates: &[
        "actix_web",
        "diesel",
        "diesel_async",
        "diesel_migrations",
        "reqwest",
        "utoipa",
        "utoipa_swagger_ui",
    ],
};

static INBOUND_RULES: LayerRules = LayerRules {
    layer: Layer::Inbound,
    forbidden_layers: &[Layer::Outbound],
    forbidden_crates: &["diesel", "diesel_async", "diesel_migrations", "reqwest"],
};

static OUTBOUND_RULES: LayerRules = LayerRules {
    layer: Layer::Outbound,
    forbidden_layers: &[Layer::Inbound],
    forbidden_crates: &["actix_web", "utoipa", "utoipa_swagger_ui"],
};

/// Rules for every layer, in layer order.
pub static RULES: [&LayerRules; 3] = [&DOMAIN_RULES, &INBOUND_RULES, &OUTBOUND_RULES];

/// What a path written inside a module points at.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Target<'a> {
    /// A module under one of the layer roots of this crate.
    Layer(Layer),
    /// The root segment of a path into another crate (or a prelude name).
    Crate(&'a str),
    /// Anything else inside this crate.
    Local,
}

/// Resolve `segments`, written inside `module`, to what they name.
///
/// `super` and `self` are resolved against `module`, so
/// `super::super::inbound` from `domain::ports` names the inbound layer.
pub(crate) fn classify<'a>(segments: &'a [String], module: &[String]) -> Target<'a> {
    let Some(first) = segments.first() else {
        return Target::Local;
    };
    match first.as_str() {
        "crate" | CRATE_NAME => layer_at(segments.get(1)),
        "self" | "super" => {
            let relative = segments
                .iter()
                .take_while(|segment| matches!(segment.as_str(), "self" | "super"))
                .count();
            let ups = segments
                .iter()
                .take(relative)
                .filter(|segment| segment.as_str() == "super")
                .count();
            if module.len() > ups {
                layer_at(module.first())
            } else {
                layer_at(segments.get(relative))
            }
        }
        other => Target::Crate(other),
    }
}

fn layer_at(segment: Option<&String>) -> Target<'static> {
    segment
        .and_then(|name| Layer::from_name(name))
        .map_or(Target::Local, Target::Layer)
}
