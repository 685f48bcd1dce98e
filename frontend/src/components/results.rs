use vision_shared::view::{EmotionCard, FingerCard, ObjectCard, Section};
use vision_shared::{SectionBody, ViewModel};
use yew::prelude::*;

pub fn render_results(view: &ViewModel) -> Html {
    if !view.has_result() {
        return html! {};
    }

    html! {
        <div class="results-container">
            {
                match &view.annotated_image {
                    Some(image) => html! {
                        <div class="annotated-image">
                            <img src={image.clone()} alt="Annotated analysis" />
                        </div>
                    },
                    None => html! {},
                }
            }
            { for view.sections.iter().map(render_section) }
        </div>
    }
}

fn render_section(section: &Section) -> Html {
    let header = section.header;

    html! {
        <section class={classes!("result-section", section.kind.as_ref().to_string())} key={section.kind.as_ref()}>
            <div class="result-header">
                <span class="section-glyph">{ header.glyph }</span>
                <div>
                    <h2>{ header.title }</h2>
                    <p class="section-subtitle">{ header.subtitle }</p>
                </div>
            </div>
            {
                match &section.body {
                    SectionBody::Emotion(cards) => html! { <>{ for cards.iter().map(render_emotion) }</> },
                    SectionBody::Fingers(card) => render_fingers(card),
                    SectionBody::Objects(card) => render_objects(card),
                    SectionBody::NoDetection { message, notice } => html! {
                        <div class="no-detection">
                            <p>{ *message }</p>
                            {
                                match notice {
                                    Some(notice) => html! { <p class="notice">{ notice }</p> },
                                    None => html! {},
                                }
                            }
                        </div>
                    },
                }
            }
        </section>
    }
}

fn render_emotion(card: &EmotionCard) -> Html {
    html! {
        <div class="emotion-card">
            <div class="emotion-main">
                <span class="emotion-glyph">{ card.glyph }</span>
                <span class="emotion-label">{ &card.label }</span>
                <span class="emotion-confidence">{ &card.confidence }</span>
            </div>
            {
                match &card.quote {
                    Some(quote) => html! { <blockquote class="emotion-quote">{ quote }</blockquote> },
                    None => html! {},
                }
            }
            <div class="result-bars">
                { for card.bars.iter().map(|bar| html! {
                    <div class={classes!("result-item", bar.top.then_some("top"))}>
                        <div class="result-label">{ &bar.label }</div>
                        <div class="result-bar-container">
                            <div class="result-bar" style={format!("width: {}%", bar.pct)}></div>
                        </div>
                        <div class="result-value">{ &bar.value }</div>
                    </div>
                })}
            </div>
        </div>
    }
}

fn render_fingers(card: &FingerCard) -> Html {
    html! {
        <div class="finger-card">
            <div class="big-count">
                <span class="count">{ card.total.to_string() }</span>
                <span class="count-label">{"fingers raised"}</span>
            </div>
            { for card.hands.iter().map(|hand| html! {
                <div class="hand-row">
                    <span class="hand-label">{ format!("{} ({})", hand.label, hand.raised) }</span>
                    <div class="digits">
                        { for hand.digits.iter().map(|(digit, up)| html! {
                            <span
                                class={classes!("digit", up.then_some("up"))}
                                title={digit.to_string()}
                            >
                                { digit.to_string() }
                            </span>
                        })}
                    </div>
                </div>
            })}
            {
                match &card.message {
                    Some(message) => html! { <p class="result-message">{ message }</p> },
                    None => html! {},
                }
            }
        </div>
    }
}

fn render_objects(card: &ObjectCard) -> Html {
    html! {
        <div class="object-card">
            <div class="big-count">
                <span class="count">{ card.count.to_string() }</span>
                <span class="count-label">{"objects"}</span>
            </div>
            <p class="method">{ format!("Method: {}", card.method) }</p>
            {
                match &card.message {
                    Some(message) => html! { <p class="result-message">{ message }</p> },
                    None => html! {},
                }
            }
        </div>
    }
}
