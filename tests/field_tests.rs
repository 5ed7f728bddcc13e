//! Settled field tests - full levels and level removal

use threetris::core::SettledField;
use threetris::types::{Cube, Shaft};

fn layer(shaft: &Shaft, y: i32) -> Vec<Cube> {
    let mut cubes = Vec::new();
    for x in 0..shaft.size_x {
        for z in 0..shaft.size_z {
            cubes.push(Cube::new(x, y, z));
        }
    }
    cubes
}

#[test]
fn test_full_layer_found_and_lost_with_one_cube() {
    let shaft = Shaft::new(3, 5, 2);
    for y in 0..shaft.size_y {
        let mut cubes = layer(&shaft, y);
        let mut field = SettledField::new(shaft.size_y);
        field.add_cubes(&cubes);
        assert_eq!(field.find_full_levels(&shaft), vec![y]);

        cubes.pop();
        let mut field = SettledField::new(shaft.size_y);
        field.add_cubes(&cubes);
        assert!(field.find_full_levels(&shaft).is_empty());
    }
}

#[test]
fn test_multiple_full_levels_ascending() {
    let shaft = Shaft::new(2, 6, 2);
    let mut field = SettledField::new(shaft.size_y);
    field.add_cubes(&layer(&shaft, 4));
    field.add_cubes(&layer(&shaft, 1));
    field.add_cubes(&[Cube::new(0, 2, 0)]);
    assert_eq!(field.find_full_levels(&shaft), vec![1, 4]);
}

#[test]
fn test_remove_level_never_reports_it_again() {
    let shaft = Shaft::new(2, 6, 2);
    let mut field = SettledField::new(shaft.size_y);
    field.add_cubes(&layer(&shaft, 2));
    field.add_cubes(&[Cube::new(0, 0, 0), Cube::new(1, 3, 1), Cube::new(0, 5, 1)]);

    assert!(field.remove_level(2));
    assert!(!field.find_full_levels(&shaft).contains(&2));
    assert_eq!(
        field.cubes(),
        vec![Cube::new(0, 0, 0), Cube::new(1, 2, 1), Cube::new(0, 4, 1)]
    );
}

#[test]
fn test_requery_after_each_removal() {
    let shaft = Shaft::new(1, 5, 1);
    let mut field = SettledField::new(shaft.size_y);
    field.add_cubes(&[Cube::new(0, 1, 0), Cube::new(0, 2, 0), Cube::new(0, 4, 0)]);

    let mut removed = Vec::new();
    while let Some(&level) = field.find_full_levels(&shaft).first() {
        field.remove_level(level);
        removed.push(level);
    }
    // Every layer of a 1x1 shaft is full, so everything goes, one layer at a time.
    assert_eq!(removed, vec![1, 1, 2]);
    assert!(field.is_empty());
}

#[test]
fn test_height_tracks_the_stack() {
    let shaft = Shaft::new(2, 4, 2);
    let mut field = SettledField::new(shaft.size_y);
    assert_eq!(field.height(&shaft), 0);
    field.add_cubes(&[Cube::new(0, 0, 0), Cube::new(1, 1, 1)]);
    assert_eq!(field.height(&shaft), 2);
    field.remove_level(0);
    assert_eq!(field.height(&shaft), 1);
}
