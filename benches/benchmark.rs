use criterion::{criterion_group, criterion_main, Criterion};
use linear_lists::data_structure::array_list::ArrayList;
use linear_lists::data_structure::circular_list::last_man_standing;
use linear_lists::data_structure::dl_list::DLList;
use linear_lists::interface::clone_list::CloneList;
use linear_lists::interface::list::List;

fn array_list_bench(c: &mut Criterion) {
    c.bench_function("ArrayList Bench", |b| {
        b.iter(|| {
            let mut array = ArrayList::new();
            for i in 0..100 {
                array.add(i, i.to_string()).unwrap();
            }
            for _i in 0..100 {
                array.remove(0).unwrap();
            }
        })
    });
}

fn dl_list_bench(c: &mut Criterion) {
    c.bench_function("DLList Bench", |b| {
        b.iter(|| {
            let mut list = DLList::new();
            for i in 0..100 {
                list.add(i / 2, i.to_string()).unwrap();
            }
            for _i in 0..100 {
                list.remove(0).unwrap();
            }
        })
    });
}

fn josephus_bench(c: &mut Criterion) {
    c.bench_function("Josephus Bench", |b| {
        b.iter(|| last_man_standing(1000, 7).unwrap())
    });
}

criterion_group!(benches, array_list_bench, dl_list_bench, josephus_bench);
criterion_main!(benches);
