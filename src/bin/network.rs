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

use graflow::maxflow::ford_fulkerson;
use graflow::mcf::{minimum_cost_flow, minimum_cost_flow_with_shortest_paths};
use graflow::{nodelink, report, Error, Result};

fn main() {
    let (args, _) = opts! {
        synopsis "Run a flow algorithm on a node-link network instance.";
        param file:String, desc:"Path of the node-link JSON document.";
        param id:String, desc:"Identifier of the output file.";
        param algorithm:String, desc:"One of ford, mincycle, minpaths, simplex.";
        param target:Option<i64>, desc:"Target flow for mincycle and minpaths.";
    }
    .parse_or_exit();

    let mut buf = Vec::new();
    if let Err(err) = run(&args.file, &args.algorithm, args.target, &mut buf) {
        buf.clear();
        report::write_exception(&mut buf, &err.to_string()).unwrap();
    }

    let path = format!("./data/{}-final.txt", args.id);
    if let Err(err) = std::fs::write(&path, &buf) {
        eprintln!("Cannot write {}: {}", path, err);
        std::process::exit(1);
    }
}

fn run(file: &str, algorithm: &str, target: Option<i64>, out: &mut Vec<u8>) -> Result<()> {
    let inst = nodelink::read_network::<i64>(file)?;
    match algorithm {
        "ford" => {
            let flow = ford_fulkerson(&inst.network, &inst.sources, &inst.sinks, &inst.ranges)?;
            let extra = vec![format!("Flow: {}.", flow.current_flow())];
            report::write_network(out, &flow, &inst.ranges, &inst.supplies, &extra)?;
        }
        "mincycle" => {
            let target = required_target(target)?;
            let flow = minimum_cost_flow(&inst.network, &inst.sources, &inst.sinks, &inst.ranges, target)?;
            let extra = vec![format!("Flow: {}. Cost: {}.", flow.current_flow(), flow.current_cost())];
            report::write_network(out, &flow, &inst.ranges, &inst.supplies, &extra)?;
        }
        "minpaths" => {
            let target = required_target(target)?;
            let (flow, found) = minimum_cost_flow_with_shortest_paths(
                &inst.network,
                &inst.sources,
                &inst.sinks,
                &inst.ranges,
                target,
            )?;
            let extra = if found {
                vec![format!("Flow: {}. Cost: {}.", flow.current_flow(), flow.current_cost())]
            } else {
                vec!["The target flow is not reachable.".to_string()]
            };
            report::write_network(out, &flow, &inst.ranges, &inst.supplies, &extra)?;
        }
        "simplex" => {
            return Err(Error::Invariant("The simplex algorithm is not implemented.".into()));
        }
        _ => {
            return Err(Error::Invariant(format!("Unknown algorithm {}.", algorithm)));
        }
    }
    Ok(())
}

fn required_target(target: Option<i64>) -> Result<i64> {
    target.ok_or_else(|| Error::Invariant("The algorithm requires a target flow.".into()))
}
