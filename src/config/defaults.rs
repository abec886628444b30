//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn url() -> Option<String> {
        None
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn language() -> String {
        "en-US".into()
    }
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn posts() -> PathBuf {
        "src/posts".into()
    }

    pub fn links() -> Option<PathBuf> {
        None
    }
}

// ============================================================================
// [tags] Section Defaults
// ============================================================================

pub mod tags {
    use super::super::HostTags;

    pub fn hidden() -> Vec<String> {
        vec!["posts".into(), "all".into()]
    }

    pub fn dropped() -> Vec<String> {
        vec!["posts".into(), "politics".into(), "net neutrality".into()]
    }

    pub fn hosts() -> Vec<HostTags> {
        vec![
            HostTags {
                pattern: "thestorygraph.com".into(),
                tags: "#Books #NowReading #TheStoryGraph".into(),
            },
            HostTags {
                pattern: "trakt.tv".into(),
                tags: "#Movies #Watching #Trakt".into(),
            },
        ]
    }
}

// ============================================================================
// [assets] Section Defaults
// ============================================================================

pub mod assets {
    pub mod images {
        use super::super::super::ImageFormat;
        use std::path::PathBuf;

        pub fn source() -> PathBuf {
            "src/assets/img".into()
        }

        pub fn output() -> PathBuf {
            "_site/assets/img/cache".into()
        }

        pub fn url_path() -> String {
            "/assets/img/cache/".into()
        }

        pub fn widths() -> Vec<u32> {
            vec![200, 320, 570, 880, 1024, 1248]
        }

        pub fn max_width() -> u32 {
            1248
        }

        pub fn formats() -> Vec<ImageFormat> {
            vec![ImageFormat::Avif, ImageFormat::Webp, ImageFormat::Jpeg]
        }

        pub fn quality() -> f32 {
            90.
        }

        pub fn speed() -> u8 {
            4
        }

        pub fn sizes() -> String {
            "90vw".into()
        }
    }

    pub mod social {
        use std::path::PathBuf;

        pub fn source() -> PathBuf {
            "_site/assets/img/social-preview".into()
        }

        pub fn command() -> Vec<String> {
            vec!["magick".into()]
        }

        pub fn background() -> String {
            "none".into()
        }

        pub fn density() -> String {
            "300".into()
        }
    }

    pub mod scripts {
        use std::path::PathBuf;

        pub fn source() -> PathBuf {
            "_site/assets/scripts/components".into()
        }
    }
}
