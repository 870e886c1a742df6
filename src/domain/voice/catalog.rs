//! Voice Catalog Tables - 静态音色目录
//!
//! 进程启动即确定，运行期只读

use super::value_objects::{ProviderKind, VoiceDescriptor};

static ELEVENLABS_VOICES: &[VoiceDescriptor] = &[
    VoiceDescriptor {
        id: "elevenlabs_rachel",
        provider: ProviderKind::ElevenLabs,
        name: "Rachel",
        cost: "$0.030",
        description: "Calm and professional",
        gender: "female",
        accent: "American",
        duration: "4.2s",
        speed: Some("Medium"),
        quality: Some("Premium"),
        model: None,
    },
    VoiceDescriptor {
        id: "elevenlabs_josh",
        provider: ProviderKind::ElevenLabs,
        name: "Josh",
        cost: "$0.030",
        description: "Deep and authoritative",
        gender: "male",
        accent: "American",
        duration: "4.1s",
        speed: Some("Medium"),
        quality: Some("Premium"),
        model: None,
    },
    VoiceDescriptor {
        id: "elevenlabs_bella",
        provider: ProviderKind::ElevenLabs,
        name: "Bella",
        cost: "$0.030",
        description: "Soft and gentle",
        gender: "female",
        accent: "American",
        duration: "4.3s",
        speed: Some("Medium"),
        quality: Some("Premium"),
        model: None,
    },
    VoiceDescriptor {
        id: "elevenlabs_antoni",
        provider: ProviderKind::ElevenLabs,
        name: "Antoni",
        cost: "$0.030",
        description: "Well-rounded and versatile",
        gender: "male",
        accent: "American",
        duration: "4.2s",
        speed: Some("Medium"),
        quality: Some("Premium"),
        model: None,
    },
];

static OPENAI_VOICES: &[VoiceDescriptor] = &[
    VoiceDescriptor {
        id: "openai_nova",
        provider: ProviderKind::OpenAi,
        name: "Nova",
        cost: "$0.015",
        description: "Warm and engaging",
        gender: "female",
        accent: "American",
        duration: "4.0s",
        speed: None,
        quality: None,
        model: Some("tts-1"),
    },
    VoiceDescriptor {
        id: "openai_alloy",
        provider: ProviderKind::OpenAi,
        name: "Alloy",
        cost: "$0.015",
        description: "Neutral and professional",
        gender: "neutral",
        accent: "American",
        duration: "4.1s",
        speed: None,
        quality: None,
        model: Some("tts-1"),
    },
];

static AZURE_VOICES: &[VoiceDescriptor] = &[
    VoiceDescriptor {
        id: "azure_jenny",
        provider: ProviderKind::Azure,
        name: "Jenny",
        cost: "$0.020",
        description: "Clear and articulate",
        gender: "female",
        accent: "American",
        duration: "4.3s",
        speed: None,
        quality: None,
        model: None,
    },
    VoiceDescriptor {
        id: "azure_guy",
        provider: ProviderKind::Azure,
        name: "Guy",
        cost: "$0.020",
        description: "Professional and confident",
        gender: "male",
        accent: "American",
        duration: "4.2s",
        speed: None,
        quality: None,
        model: None,
    },
];

static GROQ_VOICES: &[VoiceDescriptor] = &[VoiceDescriptor {
    id: "Fritz-PlayAI",
    provider: ProviderKind::Groq,
    name: "Fritz-PlayAI",
    cost: "Free",
    description: "Clear and professional AI voice",
    gender: "male",
    accent: "American",
    duration: "3.8s",
    speed: Some("Fast"),
    quality: Some("High"),
    model: Some("playai-tts"),
}];

static PLAYHT_VOICES: &[VoiceDescriptor] = &[
    VoiceDescriptor {
        id: "playht_sarah",
        provider: ProviderKind::PlayHt,
        name: "Sarah",
        cost: "$0.025",
        description: "Natural and conversational",
        gender: "female",
        accent: "American",
        duration: "4.6s",
        speed: Some("Medium"),
        quality: Some("High"),
        model: None,
    },
    VoiceDescriptor {
        id: "playht_michael",
        provider: ProviderKind::PlayHt,
        name: "Michael",
        cost: "$0.025",
        description: "Engaging and dynamic",
        gender: "male",
        accent: "American",
        duration: "4.5s",
        speed: Some("Medium"),
        quality: Some("High"),
        model: None,
    },
];

/// 某服务商的全部音色
pub fn voices_for(kind: ProviderKind) -> &'static [VoiceDescriptor] {
    match kind {
        ProviderKind::ElevenLabs => ELEVENLABS_VOICES,
        ProviderKind::OpenAi => OPENAI_VOICES,
        ProviderKind::Azure => AZURE_VOICES,
        ProviderKind::Groq => GROQ_VOICES,
        ProviderKind::PlayHt => PLAYHT_VOICES,
    }
}

/// 按服务商顺序遍历全部音色
pub fn all_voices() -> impl Iterator<Item = &'static VoiceDescriptor> {
    ProviderKind::ALL
        .into_iter()
        .flat_map(|kind| voices_for(kind).iter())
}

pub fn find_voice(voice_id: &str) -> Option<&'static VoiceDescriptor> {
    all_voices().find(|voice| voice.id == voice_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_voice_ids_are_unique() {
        let mut seen = HashSet::new();
        for voice in all_voices() {
            assert!(seen.insert(voice.id), "duplicate voice id {}", voice.id);
        }
    }

    #[test]
    fn test_voice_ids_route_to_their_provider() {
        for voice in all_voices() {
            assert_eq!(
                ProviderKind::resolve_voice(voice.id),
                Some(voice.provider),
                "voice {} does not route to {}",
                voice.id,
                voice.provider
            );
        }
    }

    #[test]
    fn test_find_voice() {
        let rachel = find_voice("elevenlabs_rachel").unwrap();
        assert_eq!(rachel.name, "Rachel");
        assert_eq!(rachel.provider, ProviderKind::ElevenLabs);
        assert!(find_voice("elevenlabs_nobody").is_none());
    }

    #[test]
    fn test_descriptor_serializes_provider_display_name() {
        let fritz = find_voice("Fritz-PlayAI").unwrap();
        let json = serde_json::to_value(fritz).unwrap();
        assert_eq!(json["provider"], "Groq");
        assert_eq!(json["model"], "playai-tts");

        let rachel = serde_json::to_value(find_voice("elevenlabs_rachel").unwrap()).unwrap();
        assert!(rachel.get("model").is_none());
    }
}
