use gloo_net::http::Request;
use serde::de::DeserializeOwned;

pub async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("GET {url}: {e}"))?;
    if !resp.ok() {
        anyhow::bail!("GET {url}: HTTP {}", resp.status());
    }
    resp.text()
        .await
        .map_err(|e| anyhow::anyhow!("GET {url}: reading body: {e}"))
}

pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> anyhow::Result<T> {
    let text = fetch_text(url).await?;
    serde_json::from_str(&text).map_err(|e| anyhow::anyhow!("{url}: {e}"))
}
