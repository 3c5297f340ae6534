//! List repository content

use crate::error::Result;
use crate::listing::LiveListing;
use crate::Voyager;

/// List every post in the repository, in repository order
pub async fn run(voyager: &Voyager) -> Result<()> {
    let listing = LiveListing::open(voyager.client.clone(), None).await?;
    while listing.load_more().await? {}

    let snapshot = listing.snapshot().await;
    println!("Posts ({}):", snapshot.posts.len());
    for post in &snapshot.posts {
        let date = post
            .first_publication_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unpublished".to_string());
        println!("  {} - {} [{}]", date, post.title, post.uid);
    }

    Ok(())
}
