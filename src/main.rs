use dynamic_array::collections::contiguous::DynamicArray;

#[derive(Debug, Clone, Default)]
struct Noisy(u8);

impl Drop for Noisy {
    fn drop(&mut self) {
        println!("Dropped Noisy({})", self.0);
    }
}

fn main() {
    println!("\n[DynamicArray]\n");

    let mut arr = DynamicArray::<u8>::new();
    println!("{:?}", arr);

    for i in 1..=3 {
        arr.push_back(i);
        println!("{:?}", arr);
    }

    arr.insert(1, 9);
    println!("{}", arr);
    arr.erase(2);
    println!("{}", arr);
    arr.pop_back();
    println!("{}", arr);

    arr.resize(5);
    println!("{:?}", arr);
    arr.resize(1);
    println!("{:?}", arr);

    println!("\n[Lifetimes]\n");

    let mut arr = DynamicArray::<Noisy>::with_len(2);
    arr.push_back(Noisy(7));
    let copy = arr.clone();
    println!("{:?}", copy);

    arr.erase(0);
    drop(arr);
    println!("Original dropped, copy still holds {} elements.", copy.len());
}
