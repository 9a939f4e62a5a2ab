/// Reusable pieces of the report area

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TagChipsProps {
    pub tags: Vec<String>,
}

#[function_component(TagChips)]
pub fn tag_chips(props: &TagChipsProps) -> Html {
    html! {
        <div class="tag-container">
            {for props.tags.iter().map(|tag| html! {
                <span class="tag-chip">{tag}</span>
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct WordCloudProps {
    #[prop_or_default]
    pub src: Option<String>,
}

#[function_component(WordCloud)]
pub fn word_cloud(props: &WordCloudProps) -> Html {
    match &props.src {
        Some(src) => html! {
            <img class="wcloud" src={src.clone()} alt="Word cloud of viewer comments" />
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct ReportHeaderProps {
    pub text: String,
    #[prop_or_default]
    pub title: String,
}

#[function_component(ReportHeader)]
pub fn report_header(props: &ReportHeaderProps) -> Html {
    html! {
        <div class="report-header">
            if !props.title.is_empty() {
                <p class="video-title">{&props.title}</p>
            }
            <p id="report" class="report-text">{&props.text}</p>
        </div>
    }
}
