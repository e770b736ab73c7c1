// Copyright 2018 The GeoRust Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::io::{self, stdout, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use geojson::GeoJson;
use geotopo::{to_geojson, TopoJson};
use log::info;
use simple_logger::SimpleLogger;

/// Extracts named objects from a TopoJSON topology as GeoJSON.
#[derive(Parser)]
#[command(name = "topo2geo")]
struct Cli {
    /// Objects to extract, as name=file.json pairs. The file `-` writes to
    /// standard output; a bare name writes `<name>.json`.
    #[arg(required = true)]
    extracts: Vec<String>,

    /// Input topology file. If unspecified the topology is read from
    /// standard input.
    #[arg(short, long)]
    in_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let text = match &cli.in_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("unable to read the topology from {:?}", path))?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    let topology = match text.parse::<TopoJson>().context("unable to parse the topology")? {
        TopoJson::Topology(topology) => topology,
        _ => bail!("the input is not a topology"),
    };

    for extract in &cli.extracts {
        let (name, path) = match extract.split_once('=') {
            Some((name, path)) => (name.to_owned(), path.to_owned()),
            None => (extract.clone(), format!("{}.json", extract)),
        };
        info!("Extracting {} to {}", name, path);
        let collection = to_geojson(&topology, &name)
            .with_context(|| format!("unable to extract \"{}\"", name))?;
        let mut out: Box<dyn io::Write> = if path == "-" {
            Box::new(stdout())
        } else {
            Box::new(fs::File::create(&path)?)
        };
        writeln!(out, "{}", GeoJson::FeatureCollection(collection))?;
    }

    Ok(())
}
