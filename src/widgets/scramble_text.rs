use gloo_timers::callback::Interval;
use web_sys::MouseEvent;
use yew::prelude::*;

use super::{prefers_reduced_motion, seeded_rng, settings};
use crate::config::ScrambleConfig;
use crate::scramble::{Glyph, Scrambler};

const SETTINGS_ID: &str = "scramble-settings";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScramblePreset {
    Headline,
    Role,
}

impl ScramblePreset {
    fn defaults(self) -> ScrambleConfig {
        match self {
            Self::Headline => ScrambleConfig::headline(),
            Self::Role => ScrambleConfig::role(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ScrambleTextProps {
    pub text: AttrValue,
    #[prop_or(ScramblePreset::Role)]
    pub preset: ScramblePreset,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(ScrambleText)]
pub fn scramble_text(props: &ScrambleTextProps) -> Html {
    let config = use_memo(props.preset, |preset| {
        ScrambleConfig::from_attributes(settings(SETTINGS_ID), preset.defaults())
    });
    let scrambler = use_mut_ref(|| Scrambler::new(&props.text, &config.alphabet, config.max_iterations));
    let glyphs = use_state(|| scrambler.borrow().resting_glyphs());
    let ticker = use_mut_ref(|| None::<Interval>);
    let rng = use_mut_ref(seeded_rng);

    {
        let scrambler = scrambler.clone();
        let glyphs = glyphs.clone();
        let ticker = ticker.clone();
        use_effect_with((props.text.clone(), config.clone()), move |(text, config)| {
            ticker.borrow_mut().take();
            let fresh = Scrambler::new(text, &config.alphabet, config.max_iterations);
            glyphs.set(fresh.resting_glyphs());
            *scrambler.borrow_mut() = fresh;

            move || {
                ticker.borrow_mut().take();
            }
        });
    }

    let onmouseenter = {
        let scrambler = scrambler.clone();
        let glyphs = glyphs.clone();
        let ticker = ticker.clone();
        let speed_ms = config.speed_ms;
        Callback::from(move |_: MouseEvent| {
            if prefers_reduced_motion() || !scrambler.borrow_mut().start() {
                return;
            }

            let scrambler = scrambler.clone();
            let glyphs = glyphs.clone();
            let rng = rng.clone();
            let slot = ticker.clone();
            let interval = Interval::new(speed_ms, move || {
                let (next, done) = scrambler.borrow_mut().tick(&mut *rng.borrow_mut());
                glyphs.set(next);
                if done {
                    slot.borrow_mut().take();
                }
            });
            *ticker.borrow_mut() = Some(interval);
        })
    };

    let onmouseleave = {
        let scrambler = scrambler.clone();
        let glyphs = glyphs.clone();
        let ticker = ticker.clone();
        Callback::from(move |_: MouseEvent| {
            if !scrambler.borrow().is_running() {
                return;
            }
            ticker.borrow_mut().take();
            glyphs.set(scrambler.borrow_mut().cancel());
        })
    };

    let spans = glyphs.iter().enumerate().map(|(index, glyph): (usize, &Glyph)| {
        html! {
            <span key={index.to_string()} class={classes!("glyph", glyph.scrambled.then_some("scrambled"))}>
                {glyph.ch.to_string()}
            </span>
        }
    });

    html! {
        <span
            class={classes!("decrypted-text", props.class.clone())}
            aria-label={props.text.clone()}
            onmouseenter={onmouseenter}
            onmouseleave={onmouseleave}
        >
            <span aria-hidden="true">{ for spans }</span>
        </span>
    }
}
