//! Closed set of icon names the public site knows how to render.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Icon attached to specifications, features, achievements, and values.
///
/// Serialised by the exact variant name. Records that omit an icon fall back
/// to [`IconName::Shield`], matching the renderer's default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum IconName {
    Hospital,
    Pill,
    FlaskConical,
    #[default]
    Shield,
    BarChart3,
    UserCheck,
    Stethoscope,
    MessageCircle,
    FileText,
    TrendingUp,
    Clock,
    Smartphone,
    Database,
    Users,
    Globe,
    Award,
    Target,
    TrendingUpIcon,
    Heart,
}

impl IconName {
    /// Every icon, in declaration order.
    pub const ALL: [Self; 19] = [
        Self::Hospital,
        Self::Pill,
        Self::FlaskConical,
        Self::Shield,
        Self::BarChart3,
        Self::UserCheck,
        Self::Stethoscope,
        Self::MessageCircle,
        Self::FileText,
        Self::TrendingUp,
        Self::Clock,
        Self::Smartphone,
        Self::Database,
        Self::Users,
        Self::Globe,
        Self::Award,
        Self::Target,
        Self::TrendingUpIcon,
        Self::Heart,
    ];
}
