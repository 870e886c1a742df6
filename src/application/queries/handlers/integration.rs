//! 接入代码片段

use serde::Serialize;

use crate::domain::voice::VoiceDescriptor;

/// 各语言的请求示例
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrationSnippets {
    pub curl: String,
    pub python: String,
    pub javascript: String,
    pub node: String,
}

impl IntegrationSnippets {
    pub fn for_voice(voice: &VoiceDescriptor) -> Self {
        let endpoint = format!("https://api.{}.com/v1/text-to-speech", voice.provider.id());
        let voice_id = voice.id;

        let curl = format!(
            "curl -X POST {endpoint} \\\n  \
             -H \"Authorization: Bearer YOUR_API_KEY\" \\\n  \
             -H \"Content-Type: application/json\" \\\n  \
             -d '{{\n    \"text\": \"Your text here\",\n    \"voice\": \"{voice_id}\",\n    \"output_format\": \"mp3\"\n  }}'"
        );

        let python = format!(
            "import requests\n\n\
             url = \"{endpoint}\"\n\
             headers = {{\n    \"Authorization\": \"Bearer YOUR_API_KEY\",\n    \"Content-Type\": \"application/json\"\n}}\n\
             data = {{\n    \"text\": \"Your text here\",\n    \"voice\": \"{voice_id}\",\n    \"output_format\": \"mp3\"\n}}\n\n\
             response = requests.post(url, headers=headers, json=data)\n\
             with open(\"output.mp3\", \"wb\") as f:\n    f.write(response.content)"
        );

        let javascript = format!(
            "const response = await fetch('{endpoint}', {{\n  \
             method: 'POST',\n  \
             headers: {{\n    'Authorization': 'Bearer YOUR_API_KEY',\n    'Content-Type': 'application/json'\n  }},\n  \
             body: JSON.stringify({{\n    text: 'Your text here',\n    voice: '{voice_id}',\n    output_format: 'mp3'\n  }})\n\
             }});\n\n\
             const audioBlob = await response.blob();\n\
             const audioUrl = URL.createObjectURL(audioBlob);"
        );

        let node = format!(
            "const axios = require('axios');\n\
             const fs = require('fs');\n\n\
             const response = await axios.post('{endpoint}', {{\n  \
             text: 'Your text here',\n  voice: '{voice_id}',\n  output_format: 'mp3'\n\
             }}, {{\n  \
             headers: {{\n    'Authorization': 'Bearer YOUR_API_KEY',\n    'Content-Type': 'application/json'\n  }},\n  \
             responseType: 'stream'\n\
             }});\n\n\
             response.data.pipe(fs.createWriteStream('output.mp3'));"
        );

        Self {
            curl,
            python,
            javascript,
            node,
        }
    }
}
