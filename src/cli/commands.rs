use crate::app::{AppContext, NewsError, Result};
use crate::domain::{Article, Category, FeedKind, FeedState};
use crate::news::{Dispatch, FetchMode};
use crate::store::HOME_NEWS_CACHE_KEY;

pub async fn show_home(ctx: &AppContext, more: usize) -> Result<()> {
    ctx.news.fetch_home(FetchMode::Initial).await;
    load_pages(ctx, FeedKind::Home, more).await;
    print_feed(ctx, FeedKind::Home).await;
    Ok(())
}

pub async fn search(ctx: &AppContext, term: &str, more: usize) -> Result<()> {
    ctx.news.search(term).await;
    load_pages(ctx, FeedKind::Search, more).await;
    print_feed(ctx, FeedKind::Search).await;
    ctx.news.query().clear();
    Ok(())
}

pub fn list_categories() {
    for category in Category::BROWSABLE {
        println!("{:<16} {}", category.label(), category.as_str());
    }
}

pub fn list_favorites(ctx: &AppContext) {
    let favorites = ctx.favorites.list();

    if favorites.is_empty() {
        println!("No favorites");
        return;
    }

    for article in &favorites {
        print_article(article);
    }
}

/// Bookmark an article shown in the cached home feed.
pub fn add_favorite(ctx: &AppContext, url: &str) -> Result<()> {
    let cached: Vec<Article> = ctx.cache.require(HOME_NEWS_CACHE_KEY)?;
    let article = cached
        .into_iter()
        .find(|a| a.url == url)
        .ok_or_else(|| NewsError::ArticleNotFound(url.to_string()))?;

    if ctx.favorites.has(url) {
        println!("Already a favorite: {}", article.title);
        return Ok(());
    }

    ctx.favorites.add(&article);
    println!("Added favorite: {}", article.title);
    Ok(())
}

pub fn remove_favorite(ctx: &AppContext, url: &str) {
    ctx.favorites.remove(url);
    println!("Removed favorite: {}", url);
}

async fn load_pages(ctx: &AppContext, kind: FeedKind, pages: usize) {
    for _ in 0..pages {
        if ctx.news.load_more(kind).await == Dispatch::Skipped {
            break;
        }
        if ctx.news.snapshot(kind).await.error_message.is_some() {
            break;
        }
    }
}

async fn print_feed(ctx: &AppContext, kind: FeedKind) {
    let state = ctx.news.snapshot(kind).await;
    report_error(&state);
    ctx.news.clear_error_message(kind).await;

    if state.articles.is_empty() {
        if state.error.is_none() {
            println!("No articles");
        }
        return;
    }

    for article in &state.articles {
        print_article(article);
    }

    if !state.has_more {
        println!("\nEnd of feed ({} articles)", state.articles.len());
    }
}

fn report_error(state: &FeedState) {
    if let Some(message) = &state.error_message {
        if state.articles.is_empty() {
            eprintln!("Error: {}", message);
        } else {
            eprintln!("! {} (showing saved articles)", message);
        }
    }
}

fn print_article(article: &Article) {
    println!("{:<18} {}", article.published_at, article.title);
    println!("{:<18} {} · {}", "", article.source.name, article.url);
}
