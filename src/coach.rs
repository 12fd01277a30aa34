use crate::ai::{strip_code_fences, AiClient, AiError, ContentBlock, ImageSource, MessageContent};
use crate::carbon::{Activity, CarbonReport, Category};
use crate::feedback::{fallback_feedback, truncate_summary, FALLBACK_TIP};
use crate::mock::random_waste_sample;
use crate::models::WasteClassification;
use tracing::{debug, warn};

const TIP_SYSTEM: &str = "You are a friendly environmental assistant for high school students. \
Write one short, concrete tip (at most 25 words) for cutting CO₂ today.";

const FEEDBACK_SYSTEM: &str = "You are an environmental coach for high school students. \
Write two sentences of personal feedback: a short assessment and one concrete suggestion for tomorrow.";

const NEWS_SYSTEM: &str = "You are an environmental educator. Summarise the news in one or two \
simple sentences for high school students and connect it to a personal action.";

const WASTE_SYSTEM: &str = "You are a waste sorting expert. Analyse the image and return JSON: \
{\"category\":\"plastic|organic|paper|metal|other\",\"emoji\":\"matching emoji\",\
\"co2_impact_kg\":number,\"tip\":\"recycling tip\",\"action\":\"one concrete action a student can take\"}. \
Return only the JSON.";

/// Generates text with the model when one is configured, falling back to fixed
/// copy on any failure.
#[derive(Clone, Default)]
pub struct Coach {
    ai: Option<AiClient>,
}

impl Coach {
    pub fn new(ai: Option<AiClient>) -> Self {
        Self { ai }
    }

    pub fn is_live(&self) -> bool {
        self.ai.is_some()
    }

    pub async fn daily_tip(&self, avg_kg: f64, top_category: Category) -> String {
        let prompt = tip_prompt(avg_kg, top_category);
        self.text_or(TIP_SYSTEM, &prompt, 300, "daily tip")
            .await
            .unwrap_or_else(|| FALLBACK_TIP.to_string())
    }

    pub async fn activity_feedback(
        &self,
        score: u8,
        report: &CarbonReport,
        activity: &Activity,
        dominant: Category,
    ) -> String {
        let prompt = feedback_prompt(score, report, activity, dominant);
        self.text_or(FEEDBACK_SYSTEM, &prompt, 300, "activity feedback")
            .await
            .unwrap_or_else(|| fallback_feedback(score).to_string())
    }

    pub async fn news_summary(&self, title: &str, summary: &str) -> String {
        let prompt = format!(
            "News: {title}. Content: {summary}. Write a summary and a personal action for students."
        );
        self.text_or(NEWS_SYSTEM, &prompt, 300, "news summary")
            .await
            .unwrap_or_else(|| truncate_summary(summary, 100))
    }

    pub async fn classify_waste(&self, image_base64: &str, media_type: &str) -> WasteClassification {
        let Some(ai) = &self.ai else {
            return random_waste_sample();
        };
        match request_classification(ai, image_base64, media_type).await {
            Ok(classification) => classification,
            Err(err) => {
                warn!("waste classification failed, using a sample: {err}");
                random_waste_sample()
            }
        }
    }

    async fn text_or(&self, system: &str, prompt: &str, max_tokens: u32, what: &str) -> Option<String> {
        let ai = self.ai.as_ref()?;
        match ai.complete_text(system, prompt, max_tokens).await {
            Ok(text) => {
                debug!("{what} generated ({} chars)", text.len());
                Some(text)
            }
            Err(err) => {
                warn!("{what} request failed: {err}");
                None
            }
        }
    }
}

async fn request_classification(
    ai: &AiClient,
    image_base64: &str,
    media_type: &str,
) -> Result<WasteClassification, AiError> {
    let content = MessageContent::Blocks(vec![
        ContentBlock::Image {
            source: ImageSource::base64(media_type, image_base64),
        },
        ContentBlock::Text {
            text: "Classify the waste in this image and give advice to a high school student.",
        },
    ]);
    let text = ai.complete(WASTE_SYSTEM, content, 400).await?;
    parse_classification(&text)
}

pub fn parse_classification(text: &str) -> Result<WasteClassification, AiError> {
    let mut classification: WasteClassification = serde_json::from_str(strip_code_fences(text))?;
    classification.mocked = false;
    Ok(classification)
}

pub fn tip_prompt(avg_kg: f64, top_category: Category) -> String {
    format!(
        "The student's 7-day average is {avg_kg:.2} kg CO₂ per day. Main source: {}. \
Write one concrete, short tip they can act on right away.",
        top_category.label()
    )
}

pub fn feedback_prompt(
    score: u8,
    report: &CarbonReport,
    activity: &Activity,
    dominant: Category,
) -> String {
    format!(
        "Green Score today: {score}/100. CO₂: {}kg. Activity: {} {}km, electricity {}h, \
ate {}, {} plastic items, {} minute shower. Largest share from: {}.",
        report.total_kg,
        activity.transport,
        activity.km,
        activity.electricity_hours,
        activity.food,
        activity.plastic_items,
        activity.shower_minutes,
        dominant.label()
    )
}
