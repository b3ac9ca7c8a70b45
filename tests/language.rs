use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};

mod helpers;

use helpers::TestClient;

#[tokio::test]
async fn test_default_locale_is_spanish() -> anyhow::Result<()> {
    let mut client = TestClient::new(helpers::app(helpers::config())?);

    let resp = client.get("/").await?;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("<html lang=\"es\">"));
    assert!(resp.body.contains("Sobre mí"));
    assert!(resp.body.contains(">EN</button>"));

    Ok(())
}

#[tokio::test]
async fn test_accept_language_selects_english() -> anyhow::Result<()> {
    let mut client =
        TestClient::new(helpers::app(helpers::config())?).accept_language("en-GB,en;q=0.8");

    let resp = client.get("/").await?;
    assert!(resp.body.contains("<html lang=\"en\">"));
    assert!(resp.body.contains("About me"));
    assert!(resp.body.contains(">ES</button>"));

    Ok(())
}

#[tokio::test]
async fn test_toggle_sets_cookie_and_returns_to_referer() -> anyhow::Result<()> {
    let mut client = TestClient::new(helpers::app(helpers::config())?);

    let resp = client
        .send(
            Request::builder()
                .method("POST")
                .uri("/language")
                .header(header::REFERER, "http://localhost:3000/cv")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cv"));
    assert_eq!(client.cookie("lang"), Some("en"));

    let resp = client.get("/cv").await?;
    assert!(resp.body.contains("<html lang=\"en\">"));
    assert!(resp.body.contains(">ES</button>"));

    let resp = client.post("/language").await?;
    assert_eq!(resp.location(), Some("/"));
    assert_eq!(client.cookie("lang"), Some("es"));

    Ok(())
}

#[tokio::test]
async fn test_cookie_wins_over_accept_language() -> anyhow::Result<()> {
    let mut client =
        TestClient::new(helpers::app(helpers::config())?).accept_language("en-US");
    client.set_cookie("lang", "es");

    let resp = client.get("/").await?;
    assert!(resp.body.contains("<html lang=\"es\">"));

    Ok(())
}

#[tokio::test]
async fn test_toggle_ignores_foreign_referer() -> anyhow::Result<()> {
    let mut client = TestClient::new(helpers::app(helpers::config())?);

    let resp = client
        .send(
            Request::builder()
                .method("POST")
                .uri("/language")
                .header(header::REFERER, "//evil.example/phish")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(resp.location(), Some("/"));

    Ok(())
}

#[tokio::test]
async fn test_configured_default_locale_applies_without_hints() -> anyhow::Result<()> {
    let mut config = helpers::config();
    config.site.default_locale = "en".to_string();
    let mut client = TestClient::new(helpers::app(config)?);

    let resp = client.get("/").await?;
    assert!(resp.body.contains("<html lang=\"en\">"));

    Ok(())
}
