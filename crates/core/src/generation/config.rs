use serde::Serialize;

/// Header line every generated test specification is expected to start with.
pub const CSV_HEADER: &str =
    "ケースID, テスト大項目,テスト中項目,小項目,テスト内容,期待結果,実施日時,ステータス";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Build the system instruction sent with every request.
///
/// The CSV header is embedded verbatim so the model reproduces it as the
/// first line of its answer.
pub fn system_instruction() -> String {
    format!(
        "\
システムの設計書が渡されるので、設計に対してテストを作成してください。
テスト仕様書をカンマ区切りで出力してください。
テスト仕様書以外の情報は不要です。
ヘッダ行は以下のようにしてください。
{CSV_HEADER}
実施日、ステータスは空欄で構いません。
"
    )
}

/// Content-safety category understood by the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(clippy::enum_variant_names)]
pub enum HarmCategory {
    HarmCategoryHateSpeech,
    HarmCategoryDangerousContent,
    HarmCategorySexuallyExplicit,
    HarmCategoryHarassment,
}

/// Blocking threshold applied to a [`HarmCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// Modality of the model's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseModality {
    Text,
}

/// Immutable generation settings, built once and shared by every request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    pub response_modality: ResponseModality,
    pub safety_settings: Vec<SafetySetting>,
    pub system_instruction: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let safety_settings = [
            HarmCategory::HarmCategoryHateSpeech,
            HarmCategory::HarmCategoryDangerousContent,
            HarmCategory::HarmCategorySexuallyExplicit,
            HarmCategory::HarmCategoryHarassment,
        ]
        .into_iter()
        .map(|category| SafetySetting {
            category,
            threshold: HarmBlockThreshold::Off,
        })
        .collect();

        Self {
            temperature: 0.0,
            top_p: 0.95,
            max_output_tokens: 8192,
            response_modality: ResponseModality::Text,
            safety_settings,
            system_instruction: system_instruction(),
        }
    }
}
