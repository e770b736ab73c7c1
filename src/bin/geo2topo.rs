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
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use geojson::GeoJson;
use geotopo::{topology, TopoJson};
use log::info;
use simple_logger::SimpleLogger;

/// Converts named GeoJSON inputs to a TopoJSON topology.
#[derive(Parser)]
#[command(name = "geo2topo")]
struct Cli {
    /// Inputs as name=file.json pairs. A bare path uses the file stem as
    /// the object name; the path `-` reads from standard input.
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Quantization grid size; 0 disables quantization.
    #[arg(short, long, default_value_t = 0)]
    quantization: u32,

    /// Path to output file. If unspecified output is written to stdout.
    #[arg(short, long)]
    out_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let mut objects = Vec::with_capacity(cli.inputs.len());
    for input in &cli.inputs {
        let (name, path) = split_input(input);
        info!("Reading {} from {}", name, path);
        let text = read_input(&path)
            .with_context(|| format!("unable to read GeoJSON from {}", path))?;
        let geojson: GeoJson = text
            .parse()
            .with_context(|| format!("unable to parse GeoJSON from {}", path))?;
        objects.push((name, geojson));
    }

    let topo = topology(objects, cli.quantization).context("unable to construct the topology")?;

    let mut out: Box<dyn io::Write> = match cli.out_file {
        Some(path) => Box::new(fs::File::create(path)?),
        None => Box::new(stdout()),
    };
    writeln!(out, "{}", TopoJson::Topology(topo))?;

    Ok(())
}

/// Splits a `name=path` argument; a bare path names the object after the
/// file stem.
fn split_input(input: &str) -> (String, String) {
    match input.split_once('=') {
        Some((name, path)) => (name.to_owned(), path.to_owned()),
        None => {
            let name = Path::new(input)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| input.to_owned());
            (name, input.to_owned())
        }
    }
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}
