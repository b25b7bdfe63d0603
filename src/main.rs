// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus CLI entrypoint.
//!
//! Runs the interactive playground. Passing a share URL (positionally or via
//! `--link`) opens it the way a browser would: the encoded snippet becomes
//! the initial document. A malformed link falls back to the default snippet;
//! that path is not an error.

use std::error::Error;

use proteus::config::PlaygroundConfig;
use proteus::link::{decode_share_link, PageAddress};
use proteus::model::fixtures::DEFAULT_CONTENT;
use proteus::model::Document;
use proteus::resource::{AttachmentLog, ResourceLoader};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<share-url>] [--read-only] [--config <path>] [--origin <origin>]\n  {program} [--link <share-url>] [--read-only] [--config <path>] [--origin <origin>]\n\nOpens the live markup playground. A share URL seeds the initial document;\nwithout one the built-in sample snippet is used.\n\n--read-only disables editing and saving (viewing and sharing still work).\n--config loads a playground config JSON (components, resources, definitions).\n--origin overrides the origin used when composing share links."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    link: Option<String>,
    config_path: Option<String>,
    origin: Option<String>,
    read_only: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--link" => {
                if options.link.is_some() {
                    return Err(());
                }
                let link = args.next().ok_or(())?;
                options.link = Some(link);
            }
            "--config" => {
                if options.config_path.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.config_path = Some(path);
            }
            "--origin" => {
                if options.origin.is_some() {
                    return Err(());
                }
                let origin = args.next().ok_or(())?;
                options.origin = Some(origin);
            }
            "--read-only" => {
                if options.read_only {
                    return Err(());
                }
                options.read_only = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.link.is_some() {
                    return Err(());
                }
                options.link = Some(arg);
            }
        }
    }

    Ok(options)
}

fn page_address(options: &CliOptions) -> PageAddress {
    match &options.origin {
        Some(origin) => PageAddress::new(origin.clone(), "/"),
        None => PageAddress::default(),
    }
}

fn initial_document(options: &CliOptions) -> Document {
    let decoded = options.link.as_deref().and_then(decode_share_link);
    match decoded {
        Some(source) => Document::from_source(source),
        None => Document::from_source(DEFAULT_CONTENT),
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "proteus".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let config = match &options.config_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                PlaygroundConfig::from_json(&raw)?
            }
            None => PlaygroundConfig::builtin(),
        };

        // Fire-and-forget: nothing downstream waits on or inspects this.
        let mut loader = AttachmentLog::new();
        loader.attach(&config.resources);

        let document = initial_document(&options);
        let page = page_address(&options);

        proteus::tui::run_with_document(document, &config, page, options.read_only)?;
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("proteus: {err}");
        std::process::exit(1);
    }
}
