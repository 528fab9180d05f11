//! Template decoding, memoization and best-match queries
//!
//! Every template raster is pushed through the same preprocessing chain the
//! analyzer applies to photographed lines (adaptive threshold, binarize,
//! denoise, close-then-open, normalize to 64x64) so that F1 similarity
//! compares like with like. Decoded masks are memoized per template path;
//! a template that fails to decode is skipped for that query and retried
//! next time rather than cached as a failure.

use crate::config::{CoreSymbolRule, SymbolConfig, SymbolRole};
use psaltica_core::{BinaryImage, Raster};
use psaltica_ops::{binarize, close_open, denoise, estimate_adaptive_threshold, foreground_f1, normalize};
use psaltica_theory::ModeProfile;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Side length of the normalized square all comparisons happen at.
pub const TEMPLATE_SIZE: u32 = 64;

/// Best core-rule match for a query patch.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateMatch {
    pub symbol_id: String,
    pub role: SymbolRole,
    pub confidence: f32,
    pub base_token: Option<String>,
}

/// Best fallback-catalog match for a query patch.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMatch {
    pub token: String,
    pub confidence: f32,
}

/// Holds the loaded configuration and memoized template masks.
pub struct TemplateRepository {
    config: SymbolConfig,
    template_root: PathBuf,
    cache: Mutex<HashMap<PathBuf, BinaryImage>>,
}

impl TemplateRepository {
    /// Build a repository over an already-loaded configuration. Template
    /// paths in the rules and catalog resolve relative to `template_root`.
    pub fn new(config: SymbolConfig, template_root: impl Into<PathBuf>) -> Self {
        TemplateRepository {
            config,
            template_root: template_root.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Load the configuration from `dir` and resolve templates there too.
    pub fn open(dir: impl AsRef<Path>) -> crate::SymbolResult<Self> {
        let dir = dir.as_ref();
        Ok(TemplateRepository::new(SymbolConfig::load(dir)?, dir))
    }

    pub fn config(&self) -> &SymbolConfig {
        &self.config
    }

    /// Ordered degree cycle for melodic traversal.
    pub fn phthongs_order(&self) -> &[String] {
        &self.config.phthongs_order
    }

    /// Mode id -> height profile.
    pub fn mode_profiles(&self) -> &HashMap<String, ModeProfile> {
        &self.config.mode_profiles
    }

    /// Look up a core rule by symbol id.
    pub fn rule_by_id(&self, id: &str) -> Option<&CoreSymbolRule> {
        self.config.core_rules.iter().find(|rule| rule.id == id)
    }

    /// Display name for a symbol id, falling back to the id itself.
    pub fn display_name_for(&self, id: &str) -> String {
        self.config
            .display_names
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    /// Scan the core rule set for the template most similar to `target`.
    /// Declaration order breaks ties: only a strictly better score replaces
    /// the current best.
    pub fn find_best_core_match(&self, target: &BinaryImage) -> Option<TemplateMatch> {
        let mut best: Option<TemplateMatch> = None;
        for rule in &self.config.core_rules {
            let Some(template) = self.template_mask(&rule.template) else {
                continue;
            };
            let confidence = foreground_f1(target, &template);
            if best.as_ref().is_none_or(|b| confidence > b.confidence) {
                best = Some(TemplateMatch {
                    symbol_id: rule.id.clone(),
                    role: rule.role,
                    confidence,
                    base_token: rule.base_token.clone(),
                });
            }
        }
        best
    }

    /// Scan the fallback catalog for the template most similar to `target`.
    pub fn find_best_catalog_match(&self, target: &BinaryImage) -> Option<CatalogMatch> {
        let mut best: Option<CatalogMatch> = None;
        for entry in &self.config.catalog {
            let Some(template) = self.template_mask(&entry.template) else {
                continue;
            };
            let confidence = foreground_f1(target, &template);
            if best.as_ref().is_none_or(|b| confidence > b.confidence) {
                best = Some(CatalogMatch {
                    token: entry.token.clone(),
                    confidence,
                });
            }
        }
        best
    }

    /// Decode, preprocess and memoize one template. Decode failures are
    /// logged and yield `None` without poisoning the cache.
    fn template_mask(&self, relative: &str) -> Option<BinaryImage> {
        let path = self.template_root.join(relative);
        if let Some(mask) = self
            .cache
            .lock()
            .ok()
            .and_then(|cache| cache.get(&path).cloned())
        {
            return Some(mask);
        }

        let raster = match decode_raster(&path) {
            Ok(raster) => raster,
            Err(error) => {
                warn!(path = %path.display(), %error, "template unavailable, skipping");
                return None;
            }
        };
        let mask = preprocess(&raster);
        debug!(path = %path.display(), foreground = mask.count_foreground(), "template decoded");
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(path, mask.clone());
        }
        Some(mask)
    }
}

/// The shared preprocessing chain: threshold, binarize, denoise,
/// close-then-open, normalize to the comparison square.
pub fn preprocess(raster: &Raster) -> BinaryImage {
    let threshold = estimate_adaptive_threshold(raster);
    let binary = binarize(raster, threshold);
    normalize(&close_open(&denoise(&binary)), TEMPLATE_SIZE)
}

fn decode_raster(path: &Path) -> Result<Raster, image::ImageError> {
    let decoded = image::open(path)?.to_rgba8();
    let (width, height) = decoded.dimensions();
    // The buffer length is exactly width * height * 4 by construction.
    Ok(Raster::from_rgba8(width, height, decoded.into_raw())
        .unwrap_or_else(|_| Raster::filled(0, 0, [255, 255, 255, 255])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogSymbol;
    use image::{Rgba, RgbaImage};

    fn temp_template_dir(tag: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("psaltica-templates-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// White 40x40 PNG with a black glyph drawn by `ink`.
    fn write_template(dir: &Path, name: &str, ink: impl Fn(u32, u32) -> bool) {
        let mut img = RgbaImage::from_pixel(40, 40, Rgba([255, 255, 255, 255]));
        for y in 0..40 {
            for x in 0..40 {
                if ink(x, y) {
                    img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
                }
            }
        }
        img.save(dir.join(name)).unwrap();
    }

    fn rule(id: &str, role: SymbolRole, template: &str) -> CoreSymbolRule {
        CoreSymbolRule {
            id: id.to_string(),
            role,
            template: template.to_string(),
            base_token: None,
            delta_steps: 0,
            default_duration_beats: None,
            duration_delta_beats: 0.0,
            set_duration_beats: None,
            redistribute_from_previous_beats: 0.0,
        }
    }

    #[test]
    fn test_core_match_prefers_most_similar_template() {
        let dir = temp_template_dir("core");
        // A solid block and a thin horizontal bar, clearly distinct.
        write_template(&dir, "block.png", |x, y| {
            (8..32).contains(&x) && (8..32).contains(&y)
        });
        write_template(&dir, "bar.png", |x, y| {
            (4..36).contains(&x) && (18..22).contains(&y)
        });
        let config = SymbolConfig {
            core_rules: vec![
                rule("block", SymbolRole::Base, "block.png"),
                rule("bar", SymbolRole::Modifier, "bar.png"),
            ],
            ..SymbolConfig::default()
        };
        let repo = TemplateRepository::new(config, &dir);

        let query = preprocess(&decode_raster(&dir.join("block.png")).unwrap());
        let best = repo.find_best_core_match(&query).unwrap();
        assert_eq!(best.symbol_id, "block");
        assert_eq!(best.role, SymbolRole::Base);
        // Identical preprocessing on both sides scores a perfect match.
        assert!((best.confidence - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_template_is_skipped_not_fatal() {
        let dir = temp_template_dir("missing");
        write_template(&dir, "present.png", |x, y| {
            (10..30).contains(&x) && (10..30).contains(&y)
        });
        let config = SymbolConfig {
            core_rules: vec![
                rule("ghost", SymbolRole::Base, "does-not-exist.png"),
                rule("present", SymbolRole::Base, "present.png"),
            ],
            ..SymbolConfig::default()
        };
        let repo = TemplateRepository::new(config, &dir);
        let query = preprocess(&decode_raster(&dir.join("present.png")).unwrap());
        let best = repo.find_best_core_match(&query).unwrap();
        assert_eq!(best.symbol_id, "present");
    }

    #[test]
    fn test_catalog_match() {
        let dir = temp_template_dir("catalog");
        write_template(&dir, "a1.png", |x, y| {
            (8..32).contains(&x) && (8..32).contains(&y)
        });
        let config = SymbolConfig {
            catalog: vec![CatalogSymbol {
                token: "a1".to_string(),
                template: "a1.png".to_string(),
            }],
            ..SymbolConfig::default()
        };
        let repo = TemplateRepository::new(config, &dir);
        let query = preprocess(&decode_raster(&dir.join("a1.png")).unwrap());
        let best = repo.find_best_catalog_match(&query).unwrap();
        assert_eq!(best.token, "a1");
        assert!(best.confidence > 0.99);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let mut config = SymbolConfig::default();
        config
            .display_names
            .insert("ison".to_string(), "Ison".to_string());
        let repo = TemplateRepository::new(config, std::env::temp_dir());
        assert_eq!(repo.display_name_for("ison"), "Ison");
        assert_eq!(repo.display_name_for("petaste"), "petaste");
    }

    #[test]
    fn test_empty_rule_set_has_no_match() {
        let repo = TemplateRepository::new(SymbolConfig::default(), std::env::temp_dir());
        let query = BinaryImage::blank(TEMPLATE_SIZE, TEMPLATE_SIZE);
        assert!(repo.find_best_core_match(&query).is_none());
        assert!(repo.find_best_catalog_match(&query).is_none());
    }
}
