use std::env;

use hashbrown::HashMap;
use mazepaths::{
    dims::Dims,
    find_distinct_paths,
    gameboard::{CellWall, Maze},
    generate_maze,
    settings::Settings,
};

use rand::{thread_rng, Rng as _};

fn main() {
    let args = env::args()
        .skip(1)
        .take(3)
        .map(|s| s.parse())
        .collect::<Result<Vec<i64>, _>>()
        .expect("Expected integers");

    assert!(
        args.is_empty() || args.len() >= 2,
        "Expected width and height, optionally a seed"
    );

    let mut settings = Settings::load_default();
    if args.len() >= 2 {
        settings = settings.set_size(Dims(args[0] as i32, args[1] as i32));
    }

    let seed = args
        .get(2)
        .map(|seed| *seed as u64)
        .unwrap_or_else(|| thread_rng().gen());
    println!("Seed: {}", seed);

    let maze = generate_maze(settings.get_size(), settings.entry(), Some(seed))
        .expect("Could not generate maze");
    let routes = find_distinct_paths(
        &maze,
        settings.entry(),
        settings.goal(),
        settings.get_max_paths(),
    )
    .expect("Entry or goal out of bounds");

    let mut marks = HashMap::new();
    for (i, route) in routes.iter().enumerate() {
        let mark = char::from_digit(i as u32 + 1, 10).unwrap_or('*');
        for &pos in route.interior() {
            marks.insert(pos, mark);
        }
        println!(
            "Route {}: {} cells, ~{}s",
            i + 1,
            route.len(),
            route.estimated_time(settings.get_seconds_per_cell())
        );
    }
    marks.insert(settings.entry(), 'S');
    marks.insert(settings.goal(), 'G');

    show_maze(&maze, &marks);
}

fn show_maze(maze: &Maze, marks: &HashMap<Dims, char>) {
    let Dims(width, height) = maze.size();

    for y in 0..height {
        let mut top = String::new();
        let mut middle = String::new();

        for x in 0..width {
            let cell = maze.get_cell(Dims(x, y)).unwrap();
            let mark = marks.get(&Dims(x, y)).copied().unwrap_or(' ');

            top.push('+');
            top.push_str(if cell.get_wall(CellWall::Top) { "---" } else { "   " });

            middle.push(if cell.get_wall(CellWall::Left) { '|' } else { ' ' });
            middle.push(' ');
            middle.push(mark);
            middle.push(' ');
        }

        println!("{}+", top);
        println!("{}|", middle);
    }

    println!("{}+", "+---".repeat(width as usize));
}
