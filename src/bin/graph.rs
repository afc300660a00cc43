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

use graflow::euler::fleury;
use graflow::mst::{kruskal, prim};
use graflow::search::{bfs, dfs_iterative, dfs_recursive};
use graflow::{nodelink, report, Error, Result};

fn main() {
    let (args, _) = opts! {
        synopsis "Run a graph algorithm on a node-link instance.";
        param file:String, desc:"Path of the node-link JSON document.";
        param id:String, desc:"Identifier of the output file.";
        param algorithm:String, desc:"One of fleury, bfs, idfs, rdfs, kruskal, prim.";
    }
    .parse_or_exit();

    let mut buf = Vec::new();
    if let Err(err) = run(&args.file, &args.algorithm, &mut buf) {
        buf.clear();
        report::write_exception(&mut buf, &err.to_string()).unwrap();
    }

    let path = format!("./data/{}-final.txt", args.id);
    if let Err(err) = std::fs::write(&path, &buf) {
        eprintln!("Cannot write {}: {}", path, err);
        std::process::exit(1);
    }
}

fn run(file: &str, algorithm: &str, out: &mut Vec<u8>) -> Result<()> {
    let g = nodelink::read_graph::<i64>(file)?;
    match algorithm {
        "fleury" => {
            let (circuit, _) = fleury(&g)?;
            report::write_digraph(out, &circuit, &[])?;
        }
        "bfs" | "idfs" | "rdfs" => {
            let (tree, _) = match algorithm {
                "bfs" => bfs(&g),
                "idfs" => dfs_iterative(&g),
                _ => dfs_recursive(&g),
            };
            report::write_graph(out, &tree, &[])?;
        }
        "kruskal" | "prim" => {
            let mst = if algorithm == "kruskal" { kruskal(&g) } else { prim(&g) };
            let extra = vec![format!("The minimum tree has weight: {}.", mst.weight)];
            report::write_graph(out, &mst.tree, &extra)?;
        }
        _ => {
            return Err(Error::Invariant(format!("Unknown algorithm {}.", algorithm)));
        }
    }
    Ok(())
}
