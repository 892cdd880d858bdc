use crate::charts::{activity_breakdown, Share};
use crate::content::{SiteContent, TravelStat};

const FALLBACK_ACTIVITY_TIMELINE: &str = "Timeline details coming soon";
const FALLBACK_MILESTONE: (&str, &str, &str) = (
    "Continue learning and exploring",
    "Deepen professional knowledge, develop comprehensive abilities",
    "Preparing for the future",
);
const FALLBACK_LOCATION: (&str, &str) = (
    "A wonderful travel experience that shaped my perspective.",
    "Culture, Experience, Growth",
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Panel {
    Activity(String),
    Milestone(u32),
    Location(String),
    AgeBreakdown(usize),
    TravelStats,
}

impl Panel {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Activity(_) => "activity",
            Self::Milestone(_) => "milestone",
            Self::Location(_) => "location",
            Self::AgeBreakdown(_) => "age_breakdown",
            Self::TravelStats => "travel_stats",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub heading: String,
    pub body: String,
}

impl Section {
    fn new(heading: &str, body: impl Into<String>) -> Self {
        Self {
            heading: heading.to_string(),
            body: body.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelBody {
    pub title: String,
    pub badge: Option<String>,
    pub sections: Vec<Section>,
    pub shares: Vec<Share>,
    pub stats: Vec<TravelStat>,
}

pub fn closes_on_key(key: &str) -> bool {
    matches!(key, "Escape" | "Esc")
}

pub fn describe(panel: &Panel, content: &SiteContent) -> PanelBody {
    match panel {
        Panel::Activity(category) => {
            let Some(activity) = content.activity(category) else {
                return PanelBody {
                    title: category.clone(),
                    sections: vec![Section::new("Timeline", FALLBACK_ACTIVITY_TIMELINE)],
                    ..PanelBody::default()
                };
            };
            PanelBody {
                title: activity.title.clone(),
                sections: vec![
                    Section::new("Timeline", activity.timeline.clone()),
                    Section::new("Time Investment", activity.stats.clone()),
                    Section::new("Story", activity.description.clone()),
                ],
                ..PanelBody::default()
            }
        }
        Panel::Milestone(age) => {
            let (label, activities, learning, events) = match content.milestone(*age) {
                Some(milestone) => (
                    milestone.label.clone(),
                    milestone.activities.clone(),
                    milestone.learning.clone(),
                    milestone.events.clone(),
                ),
                None => (
                    "Milestone".to_string(),
                    FALLBACK_MILESTONE.0.to_string(),
                    FALLBACK_MILESTONE.1.to_string(),
                    FALLBACK_MILESTONE.2.to_string(),
                ),
            };
            PanelBody {
                title: format!("{age} years - {label}"),
                badge: Some(format!("{age} years")),
                sections: vec![
                    Section::new("Main Activities", activities),
                    Section::new("Learning Content", learning),
                    Section::new("Important Events", events),
                ],
                ..PanelBody::default()
            }
        }
        Panel::Location(name) => {
            let stop = content.travel.stop_named(name);
            let (description, highlights) = match stop {
                Some(stop) if !stop.highlights.is_empty() => (stop.description.clone(), stop.highlights.clone()),
                Some(stop) => (stop.description.clone(), FALLBACK_LOCATION.1.to_string()),
                None => (FALLBACK_LOCATION.0.to_string(), FALLBACK_LOCATION.1.to_string()),
            };
            PanelBody {
                title: name.clone(),
                badge: Some(stop.map(|stop| stop.age_label()).unwrap_or_else(|| "Unknown Age".to_string())),
                sections: vec![
                    Section::new("About", description),
                    Section::new("Highlights", highlights),
                ],
                ..PanelBody::default()
            }
        }
        Panel::AgeBreakdown(index) => {
            let label = content
                .age_activity
                .labels
                .get(*index)
                .cloned()
                .unwrap_or_else(|| "Unknown Age".to_string());
            let shares = activity_breakdown(&content.age_activity, *index);
            PanelBody {
                title: format!("{label} - Activity Breakdown"),
                badge: Some(format!("Total Activities: {}", shares.len())),
                sections: vec![Section::new(
                    &format!("{label} Development Context"),
                    content.age_context(&label),
                )],
                shares,
                ..PanelBody::default()
            }
        }
        Panel::TravelStats => PanelBody {
            title: "Travel Statistics".to_string(),
            stats: content.travel.stats.clone(),
            sections: vec![Section::new(
                "Hometown",
                format!("{}: {}", content.travel.residence.name, content.travel.residence.description),
            )],
            ..PanelBody::default()
        },
    }
}
