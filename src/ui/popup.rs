/// Popup UI for the Emotional YouTube extension

use std::rc::Rc;

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::browser::{ChromeTabHost, FetchTransport, listen_for_video_ids};
use crate::config::PopupConfig;
use crate::controller::PopupController;
use crate::render::UiUpdate;
use crate::ui::components::{ReportHeader, TagChips, WordCloud};
use crate::view::{IdField, ReportPanel, apply};

type Controller = PopupController<ChromeTabHost, FetchTransport>;

#[derive(Clone, Default, PartialEq)]
struct PopupState {
    panel: ReportPanel,
    in_flight: u32,
}

enum PopupAction {
    AnalysisStarted,
    AnalysisFinished(Vec<UiUpdate>),
}

enum IdFieldAction {
    Set(String),
    Offer(String),
}

impl Reducible for IdField {
    type Action = IdFieldAction;

    fn reduce(self: Rc<Self>, action: IdFieldAction) -> Rc<Self> {
        let mut next = (*self).clone();
        let changed = match action {
            IdFieldAction::Set(value) => {
                next.set(value);
                true
            }
            IdFieldAction::Offer(value) => next.offer(value),
        };
        if changed { Rc::new(next) } else { self }
    }
}

impl Reducible for PopupState {
    type Action = PopupAction;

    fn reduce(self: Rc<Self>, action: PopupAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            PopupAction::AnalysisStarted => next.in_flight += 1,
            PopupAction::AnalysisFinished(updates) => {
                next.in_flight = next.in_flight.saturating_sub(1);
                apply(&mut next.panel, &updates);
            }
        }
        Rc::new(next)
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let controller = use_memo((), |_| {
        Controller::new(ChromeTabHost, FetchTransport, PopupConfig::from_build_env())
    });
    let video_input = use_reducer(IdField::default);
    let state = use_reducer(PopupState::default);

    // Fill the id box on open, follow background messages, cancel on close
    {
        let controller = controller.clone();
        let video_input = video_input.clone();

        use_effect_with((), move |_| {
            let listener = {
                let controller = controller.clone();
                let video_input = video_input.clone();
                listen_for_video_ids(move |message| {
                    if let Some(vid) = controller.on_video_message(&message) {
                        video_input.dispatch(IdFieldAction::Set(vid));
                    }
                })
            };

            {
                let controller = controller.clone();
                spawn_local(async move {
                    let vid = controller.on_open().await;
                    if !controller.lifetime().is_closed() {
                        video_input.dispatch(IdFieldAction::Offer(vid));
                    }
                });
            }

            move || {
                controller.teardown();
                drop(listener);
            }
        });
    }

    let on_input = {
        let video_input = video_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                video_input.dispatch(IdFieldAction::Set(input.value()));
            }
        })
    };

    // Every click is an independent request; the last one to finish wins
    let on_analyze = {
        let controller = controller.clone();
        let video_input = video_input.clone();
        let state = state.clone();

        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            let input = video_input.value().to_string();
            let state = state.clone();

            state.dispatch(PopupAction::AnalysisStarted);
            spawn_local(async move {
                if let Some(updates) = controller.on_analyze(&input).await {
                    state.dispatch(PopupAction::AnalysisFinished(updates));
                }
            });
        })
    };

    let panel = &state.panel;

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Emotional YouTube"}</h1>

            <div class="flex-column-gap">
                <input
                    id="idbox"
                    type="text"
                    placeholder="Video id"
                    value={video_input.value().to_string()}
                    oninput={on_input}
                    class="search-input"
                />
                <Button onclick={on_analyze} variant={ButtonVariant::Primary} block={true}>
                    {"Analyze"}
                </Button>
            </div>

            if state.in_flight > 0 {
                <div class="loading-text-center">
                    <Spinner />
                </div>
            }

            <div class="report-container">
                <ReportHeader text={panel.text.clone()} title={panel.title.clone()} />
                <WordCloud src={panel.image.clone()} />
                <TagChips tags={panel.tags.clone()} />
            </div>
        </div>
    }
}
