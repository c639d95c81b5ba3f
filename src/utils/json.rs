use std::fs;
use std::collections::BTreeMap;
use serde::Serialize;
use crate::component::{sorted_by_id, Solution};
use super::error::Result;


#[derive(Serialize)]
struct SolutionJson<'a> {
    is_feasible: bool,
    running_time_seconds: f64,
    chosen_paths: Vec<PairJson<'a>>,
}

#[derive(Serialize)]
struct PairJson<'a> {
    src: &'a str,
    dst: &'a str,
    paths: BTreeMap<&'a str, Vec<&'a str>>,
}


pub fn solution_to_string(solution: &Solution) -> Result<String> {
    let chosen_paths = solution.pairs().into_iter()
        .map(|pair| PairJson {
            src: pair.src.id(),
            dst: pair.dst.id(),
            paths: sorted_by_id(&solution.chosen_paths[pair]).into_iter()
                .map(|(id, path)| (id.as_str(), path.nodes().into_iter().map(|n| n.id()).collect()))
                .collect(),
        })
        .collect();
    let json = SolutionJson {
        is_feasible: solution.is_feasible,
        running_time_seconds: solution.running_time_seconds,
        chosen_paths,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

pub fn dump_solution(path: &str, solution: &Solution) -> Result<()> {
    fs::write(path, solution_to_string(solution)?)?;
    Ok(())
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::component::{empty_path_set, insert_path};
    use crate::network::{Link, Node, Path, SourceDestPair};

    #[test]
    fn test_solution_json() {
        let pair = SourceDestPair::from(("A", "C"));
        let (a, b, c) = (Node::new("A"), Node::new("B"), Node::new("C"));
        let mut chosen = empty_path_set(&[pair.clone(), ("B", "D").into()]);
        insert_path(&mut chosen, &pair, Path::new(vec![Link::between(&a, &b, 1), Link::between(&b, &c, 1)]));
        let solution = Solution::new(chosen, true);
        let value: serde_json::Value = serde_json::from_str(&solution_to_string(&solution).unwrap()).unwrap();
        assert_eq!(value["is_feasible"], true);
        assert_eq!(value["chosen_paths"][0]["src"], "A");
        assert_eq!(value["chosen_paths"][0]["paths"]["1"], serde_json::json!(["A", "B", "C"]));
        assert_eq!(value["chosen_paths"][1]["paths"], serde_json::json!({}));
    }
}
