//! Demo trends loaded into an empty store on first startup.

use crate::trend::{NewTrend, TrendStatus};

fn trend(
  name: &str,
  velocity: f64,
  category: &str,
  status: TrendStatus,
  description: &str,
  evidence: &[&str],
) -> NewTrend {
  NewTrend {
    name: name.to_owned(),
    velocity,
    category: category.to_owned(),
    status,
    description: description.to_owned(),
    evidence: evidence.iter().map(|e| (*e).to_owned()).collect(),
  }
}

/// The eight demo trends, in insertion order.
pub fn default_trends() -> Vec<NewTrend> {
  use TrendStatus::*;

  vec![
    trend(
      "Mushroom Decor",
      9.8,
      "Home Decor",
      Rising,
      "A rising interest in fungi-inspired home goods, from lamps to textiles.",
      &[
        "The Hottest Home Trend Is Fungi-Inspired Decor - DesignDigest.com",
        "Why Everyone is Buying Mushroom Lamps for a Whimsical Vibe - ApartmentInspo.net",
        "Pinterest Trends Report shows 350% increase in searches for 'Mushroom Art'",
        "Etsy Bestsellers: Hand-carved Wooden Mushroom Figurines",
      ],
    ),
    trend(
      "Checkered Patterns",
      8.1,
      "Home Decor",
      Rising,
      "The classic checkerboard pattern is seeing a major resurgence in rugs, blankets, and ceramics.",
      &[
        "Checkmate: The Enduring Appeal of the Checkerboard - StyleWeekly.com",
        "TikTok #CheckeredRug hashtag surpasses 10 million views",
        "Spotted: Checkered Patterns on ceramics at the NY Now Trade Show",
      ],
    ),
    trend(
      "Craft Cocktail Kits",
      7.5,
      "Food & Beverage",
      Stable,
      "DIY kits for creating unique, high-quality cocktails at home.",
      &[
        "The Rise of the Home Mixologist: Best Cocktail Kits of 2025 - GQ Magazine",
        "Review: A kit for smoking your own cocktails at home - TheVerge.com",
        "Internal Search Data: High search volume for 'cocktail smoker' and 'artisan bitters'",
      ],
    ),
    trend(
      "Vintage Denim",
      6.9,
      "Fashion",
      Stable,
      "Secondhand and reworked denim from the 80s and 90s keeps its steady following.",
      &[
        "Resale platforms report denim as a top-three category - ThreadCount.io",
        "Upcycled Jeans Workshops Sell Out in Three Cities - LocalMakers.org",
      ],
    ),
    trend(
      "Sourdough Everything",
      6.2,
      "Food & Beverage",
      Declining,
      "Home starters, sourdough crackers and pizza bases, cooling off after a long peak.",
      &[
        "Search interest for 'sourdough starter' down 20% year over year",
        "Bakery owners note a shift toward focaccia - FoodTradeWeekly.com",
      ],
    ),
    trend(
      "Maximalist Jewelry",
      8.7,
      "Fashion",
      Rising,
      "Chunky, layered and colourful statement pieces replacing minimalist chains.",
      &[
        "Runway Roundup: Stacked Bangles Everywhere - ModeJournal.com",
        "Instagram #MaximalistJewelry posts doubled in six months",
        "Etsy Bestsellers: Oversized Resin Earrings",
      ],
    ),
    trend(
      "Plant-Based Leather",
      7.8,
      "Fashion",
      Rising,
      "Bags and shoes made from cactus, apple and mycelium leather alternatives.",
      &[
        "Big-name sneaker brands launch cactus leather lines - SoleNews.com",
        "Material Innovation Report: plant-based leather investment up 40%",
      ],
    ),
    trend(
      "Cottagecore Crafts",
      5.4,
      "Lifestyle",
      Declining,
      "Pressed flowers, embroidery hoops and rustic handmade goods losing steam.",
      &[
        "Craft store sales of embroidery kits flatten - RetailPulse.net",
        "TikTok #Cottagecore views down for the third straight quarter",
      ],
    ),
  ]
}
