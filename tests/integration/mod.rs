mod context_processors;
mod sitemap_ping;
