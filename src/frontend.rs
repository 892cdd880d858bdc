use gloo_net::http::Request;
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, MouseEvent};
use yew::prelude::*;

use crate::content::{SiteContent, TravelLog};
use crate::panels::Panel;
use crate::telemetry::{log_event, set_min_level, LogLevel};
use crate::widgets::chart::{ChartKind, ChartView};
use crate::widgets::globe::Globe;
use crate::widgets::marquee::LogoLoop;
use crate::widgets::mini_chart::MiniChart;
use crate::widgets::modal::DetailModal;
use crate::widgets::orbit::Orbit;
use crate::widgets::parallax::ParallaxShapes;
use crate::widgets::reveal::Reveal;
use crate::widgets::scramble_text::{ScramblePreset, ScrambleText};
use crate::widgets::snowfall::Snowfall;
use crate::widgets::tilt_card::TiltCard;
use crate::widgets::travel_map::TravelMap;
use crate::widgets::world_map::WorldMap;
use crate::widgets::document;

const TRAVEL_LOG_URL: &str = "/content/travel.json";

fn load_content() -> SiteContent {
    let content = match SiteContent::embedded() {
        Ok(content) => content,
        Err(error) => {
            log_event(
                LogLevel::Error,
                "content_invalid",
                json!({ "source": "embedded", "error": error.to_string() }),
            );
            return SiteContent::default();
        }
    };

    let issues = content.issues();
    if issues.is_empty() {
        log_event(
            LogLevel::Info,
            "content_loaded",
            json!({
                "activities": content.activities.len(),
                "milestones": content.milestones.len(),
                "stops": content.travel.stops.len(),
            }),
        );
    } else {
        log_event(LogLevel::Warn, "content_invalid", json!({ "source": "embedded", "issues": issues }));
    }
    content
}

async fn fetch_travel_log() -> Result<TravelLog, String> {
    let response = Request::get(TRAVEL_LOG_URL)
        .send()
        .await
        .map_err(|error| error.to_string())?;
    if !response.ok() {
        return Err(format!("status {}", response.status()));
    }
    let body = response.text().await.map_err(|error| error.to_string())?;
    TravelLog::from_json(&body).map_err(|error| error.to_string())
}

fn open(panel: &UseStateHandle<Option<Panel>>, next: Panel) -> Callback<MouseEvent> {
    let panel = panel.clone();
    Callback::from(move |_: MouseEvent| panel.set(Some(next.clone())))
}

#[function_component(App)]
fn app() -> Html {
    let base = use_memo((), |_| load_content());
    let fetched = use_state(|| None::<TravelLog>);
    let panel = use_state(|| None::<Panel>);

    {
        let fetched = fetched.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match fetch_travel_log().await {
                    Ok(log) => {
                        log_event(LogLevel::Info, "travel_log_fetched", json!({ "stops": log.stops.len() }));
                        fetched.set(Some(log));
                    }
                    Err(error) => {
                        log_event(
                            LogLevel::Warn,
                            "travel_log_fetch_failed",
                            json!({ "url": TRAVEL_LOG_URL, "error": error }),
                        );
                    }
                }
            });
            || ()
        });
    }

    let content: Rc<SiteContent> = {
        let base = base.clone();
        use_memo((*fetched).clone(), move |fetched| {
            let mut content = (*base).clone();
            if let Some(log) = fetched {
                content.travel = log.clone();
            }
            content
        })
    };

    let on_close = {
        let panel = panel.clone();
        Callback::from(move |_| panel.set(None))
    };

    let on_age_select = {
        let panel = panel.clone();
        Callback::from(move |index: usize| panel.set(Some(Panel::AgeBreakdown(index))))
    };

    let on_location_select = {
        let panel = panel.clone();
        Callback::from(move |name: String| panel.set(Some(Panel::Location(name))))
    };

    let profile = &content.profile;
    let roles = profile.roles.iter().map(|role| {
        html! {
            <li key={role.clone()}>
                <ScrambleText text={role.clone()} preset={ScramblePreset::Role} class={classes!("role")} />
            </li>
        }
    });

    let activity_cards = content.activities.iter().enumerate().map(|(index, activity)| {
        let is_active = *panel == Some(Panel::Activity(activity.category.clone()));
        html! {
            <Reveal key={activity.category.clone()} index={index}>
                <button
                    type="button"
                    class={classes!("activity-card", activity.category.clone(), is_active.then_some("active"))}
                    onclick={open(&panel, Panel::Activity(activity.category.clone()))}
                >
                    <h3>{activity.title.clone()}</h3>
                    <p class="muted">{activity.timeline.clone()}</p>
                </button>
            </Reveal>
        }
    });

    let milestones = content.milestones.iter().map(|milestone| {
        let is_active = *panel == Some(Panel::Milestone(milestone.age));
        html! {
            <li key={milestone.age.to_string()}>
                <button
                    type="button"
                    class={classes!("timeline-item", is_active.then_some("active"))}
                    onclick={open(&panel, Panel::Milestone(milestone.age))}
                >
                    <span class="timeline-age">{format!("{} years", milestone.age)}</span>
                    <span class="timeline-label">{milestone.label.clone()}</span>
                </button>
            </li>
        }
    });

    html! {
        <>
            <a class="skip-link" href="#content">{"Skip to main content"}</a>
            <Snowfall />
            <div class="page-shell">
                <header class="hero" aria-labelledby="identity-heading">
                    <ParallaxShapes />
                    <TiltCard>
                        <div class="pc-card__identity">
                            if let Some(avatar) = profile.avatar.clone() {
                                <img class="pc-card__avatar" src={avatar} alt={profile.name.clone()} />
                            }
                            <h1 id="identity-heading">
                                <ScrambleText text={profile.name.clone()} preset={ScramblePreset::Headline} class={classes!("name")} />
                            </h1>
                            <p class="pc-card__handle">{format!("@{}", profile.handle)}</p>
                            <p class="pc-card__status">{profile.status.clone()}</p>
                            if let Some(href) = profile.contact_href.clone() {
                                <a class="pc-card__contact" href={href}>{"Contact"}</a>
                            }
                        </div>
                    </TiltCard>
                    <ul class="roles">{ for roles }</ul>
                    <p class="tagline">{profile.tagline.clone()}</p>
                </header>

                <main id="content">
                    <section aria-labelledby="stack-heading" class="section-block">
                        <h2 id="stack-heading">{"Stack"}</h2>
                        <Orbit icons={content.tech_icons.clone()}>
                            <span class="orbit__center-label">{profile.name.clone()}</span>
                        </Orbit>
                        <LogoLoop logos={content.logos.clone()} />
                    </section>

                    <section aria-labelledby="activities-heading" class="section-block">
                        <h2 id="activities-heading">{"Activities"}</h2>
                        <div class="activity-grid">{ for activity_cards }</div>
                    </section>

                    <section aria-labelledby="timeline-heading" class="section-block">
                        <h2 id="timeline-heading">{"Timeline"}</h2>
                        <ol class="timeline">{ for milestones }</ol>
                    </section>

                    <section aria-labelledby="time-heading" class="section-block">
                        <h2 id="time-heading">{"Where the time went"}</h2>
                        <MiniChart data={content.time_distribution.clone()} label="Peak weekly share per activity" />
                        <ChartView
                            kind={ChartKind::TimeDistribution}
                            data={content.time_distribution.clone()}
                            label="Hours per activity by age"
                        />
                        <ChartView
                            kind={ChartKind::AgeActivity}
                            data={content.age_activity.clone()}
                            label="Share of activities per age range"
                            on_select={on_age_select}
                        />
                    </section>

                    <section aria-labelledby="travel-heading" class="section-block">
                        <h2 id="travel-heading">{"Travel"}</h2>
                        <WorldMap stops={content.travel.stops.clone()} on_select={on_location_select} />
                        <TravelMap log={content.travel.clone()} />
                        <Globe stops={content.travel.stops.clone()} />
                        <button
                            type="button"
                            class={classes!("travel-stats-btn", (*panel == Some(Panel::TravelStats)).then_some("active"))}
                            onclick={open(&panel, Panel::TravelStats)}
                        >
                            {"Travel statistics"}
                        </button>
                    </section>
                </main>
            </div>
            if let Some(current) = (*panel).clone() {
                <DetailModal panel={current} content={content.clone()} on_close={on_close} />
            }
        </>
    }
}

fn configured_log_level() -> LogLevel {
    let value = document()
        .and_then(|d| d.document_element())
        .and_then(|root| root.get_attribute("data-log-level"));
    LogLevel::parse(value.as_deref(), LogLevel::Info)
}

pub fn run() {
    let level = configured_log_level();
    set_min_level(level);
    log_event(LogLevel::Info, "app_started", json!({ "log_level": level.as_str() }));

    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
