// Copyright (c) 2020-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

use rustop::opts;

use graflow::shortestpath::{dijkstra, floyd_warshall, DijkstraResult};
use graflow::{nodelink, report, Digraph, Error, Result};

fn main() {
    let (args, _) = opts! {
        synopsis "Run a digraph algorithm on a node-link instance.";
        param file:String, desc:"Path of the node-link JSON document.";
        param id:String, desc:"Identifier of the output file.";
        param algorithm:String, desc:"One of dijkstra, floyd.";
        param start:String, desc:"Start vertex for dijkstra, ignored by floyd.";
    }
    .parse_or_exit();

    let mut buf = Vec::new();
    if let Err(err) = run(&args.file, &args.algorithm, &args.start, &mut buf) {
        buf.clear();
        report::write_exception(&mut buf, &err.to_string()).unwrap();
    }

    let path = format!("./data/{}-final.txt", args.id);
    if let Err(err) = std::fs::write(&path, &buf) {
        eprintln!("Cannot write {}: {}", path, err);
        std::process::exit(1);
    }
}

fn run(file: &str, algorithm: &str, start: &str, out: &mut Vec<u8>) -> Result<()> {
    let g = nodelink::read_digraph::<i64>(file)?;
    match algorithm {
        "dijkstra" => match dijkstra(&g, &start.to_string())? {
            DijkstraResult::Tree(shortest) => {
                report::write_digraph(out, &shortest.tree, &[])?;
            }
            DijkstraResult::NegativeCycle(cycle) => {
                report::write_digraph(out, &cycle, &["A negative cycle was found.".to_string()])?;
            }
        },
        "floyd" => {
            let routes = floyd_warshall(&g)?;

            // all arborescences in one digraph, the vertex names of
            // tree number k carry k primes
            let mut combined = Digraph::new();
            for (tree_no, (_, tree)) in routes.arborescences(&g).into_iter().enumerate() {
                let suffix = "'".repeat(tree_no);
                for v in tree.vertices() {
                    combined.add_vertex(format!("{}{}", v.name(), suffix));
                }
                for arc in tree.arcs() {
                    combined.add_arc(
                        format!("{}{}", arc.source, suffix),
                        format!("{}{}", arc.terminus, suffix),
                        arc.weight,
                    )?;
                }
            }
            report::write_digraph(out, &combined, &[])?;
        }
        _ => {
            return Err(Error::Invariant(format!("Unknown algorithm {}.", algorithm)));
        }
    }
    Ok(())
}
