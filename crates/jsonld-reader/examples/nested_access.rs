//! Example of chained navigation through an expanded ActivityStreams note.
//!
//! cargo run --package jsonld-reader --example nested_access

use jsonld_reader::{ExpansionOptions, Passthrough, parse};
use serde_json::json;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let stored = json!({
        "@id": "https://example.com/notes/1",
        "@type": ["https://www.w3.org/ns/activitystreams#Note"],
        "https://www.w3.org/ns/activitystreams#attachment": [
            {
                "@type": ["https://www.w3.org/ns/activitystreams#Document"],
                "https://www.w3.org/ns/activitystreams#mediaType": [{ "@value": "image/png" }],
                "https://www.w3.org/ns/activitystreams#url": [{ "@id": "https://example.com/a.png" }]
            },
            {
                "@type": ["https://www.w3.org/ns/activitystreams#Document"],
                "https://www.w3.org/ns/activitystreams#mediaType": [{ "@value": "video/mp4" }],
                "https://www.w3.org/ns/activitystreams#url": [{ "@id": "https://example.com/b.mp4" }]
            }
        ]
    });

    // node = root
    let root = parse(&Passthrough, &stored, &ExpansionOptions::default()).await?;
    println!("{} {}", root.read("type").try_string()?, root.read("id").try_string()?);

    // node = root["attachment"][i]["mediaType"]
    let attachments = root.read("attachment");
    for (i, attachment) in attachments.iter().enumerate() {
        let media_type = attachment.read("mediaType").try_string()?;
        let url = attachment.read("url").string_or("");
        println!("[{i}] {media_type} {url}");
    }

    // node = root["attachment"][2] does not exist
    let missing = attachments.read(2).read("mediaType");
    println!("{}", missing.error().map_or_else(String::new, ToString::to_string));

    Ok(())
}
