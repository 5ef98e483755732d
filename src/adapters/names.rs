//! Random display names for newly connected participants.
//!
//! Names are "<Adjective> <Animal>", e.g. "Calm Otter". They are not unique;
//! participants are told apart by id.

use rand::seq::IndexedRandom;

const ADJECTIVES: &[&str] = &[
    "Able", "Abundant", "Adorable", "Agreeable", "Ancient", "Angry", "Bad", "Beautiful",
    "Better", "Bewildered", "Big", "Bitter", "Black", "Blue", "Boiling", "Brave", "Breeze",
    "Brief", "Broad", "Broken", "Bumpy", "Calm", "Careful", "Chilly", "Chubby", "Clean",
    "Clever", "Clumsy", "Cold", "Cool", "Creepy", "Crooked", "Cuddly", "Curly", "Curved",
    "Damaged", "Damp", "Dead", "Deafening", "Deep", "Defeated", "Delicious", "Delightful",
    "Different", "Drab", "Dry", "Eager", "Early", "Easy", "Elegant", "Embarrassed", "Empty",
    "Faithful", "Famous", "Fancy", "Fast", "Fat", "Fierce", "Filthy", "First", "Flaky", "Flat",
    "Fluffy", "Freezing", "Fresh", "Full", "Gentle", "Gifted", "Gigantic", "Glamorous", "Good",
    "Gray", "Greasy", "Great", "Green", "Grumpy", "Happy", "Heavy", "Helpful", "Helpless",
    "High", "Hissing", "Hollow", "Huge", "Icy", "Important", "Jealous", "Jolly", "Kind",
    "Large", "Last", "Late", "Lazy", "Light", "Little", "Lively", "Long", "Loud", "Low",
    "Magnificent", "Mammoth", "Many", "Massive", "Melodic", "Melted", "Miniature", "Modern",
    "Mushy", "Mysterious", "Narrow", "Nervous", "New", "Next", "Nice", "Noisy", "Numerous",
    "Obedient", "Obnoxious", "Odd", "Old", "Orange", "Own", "Panicky", "Petite", "Plain",
    "Powerful", "Prickly", "Proud", "Public", "Puny", "Purple", "Purring", "Quaint", "Quick",
    "Quiet", "Rainy", "Rapid", "Raspy", "Red", "Relieved", "Repulsive", "Rich", "Right",
    "Rotten", "Round", "Salty", "Same", "Scary", "Scrawny", "Screeching", "Shallow", "Short",
    "Shy", "Silly", "Slow", "Small", "Sparkling", "Sparse", "Square", "Steep", "Sticky",
    "Straight", "Strong", "Substantial", "Sweet", "Swift", "Tall", "Tasteless", "Thankful",
    "Thoughtless", "Thundering", "Tiny", "Ugliest", "Uneven", "Uninterested", "Unsightly",
    "Uptight", "Vast", "Victorious", "Voiceless", "Warm", "Weak", "Whispering", "White",
    "Wide", "Witty", "Wooden", "Worried", "Wrong", "Yellow", "Young", "Yummy", "Zealous",
];

const ANIMALS: &[&str] = &[
    "Albatross", "Alligator", "Anteater", "Antelope", "Armadillo", "Baboon", "Badger",
    "Bandicoot", "Barracuda", "Bat", "Bear", "Bird", "Bison", "Bobcat", "Bonobo", "Buffalo",
    "Bullfrog", "Butterfly", "Camel", "Capybara", "Cat", "Caterpillar", "Catfish", "Chameleon",
    "Cheetah", "Chicken", "Chimpanzee", "Chinchilla", "Chipmunk", "Cougar", "Cow", "Coyote",
    "Crab", "Crocodile", "Deer", "Dingo", "Dog", "Dolphin", "Donkey", "Duck", "Eagle",
    "Elephant", "Emu", "Falcon", "Ferret", "Flamingo", "Fox", "Frog", "Gecko", "Gerbil",
    "Gharial", "Giraffe", "Goat", "Goose", "Gopher", "Gorilla", "Hamster", "Hare", "Hedgehog",
    "Horse", "Jackal", "Jaguar", "Kangaroo", "Kiwi", "Koala", "Lemming", "Lemur", "Leopard",
    "Liger", "Lion", "Lizard", "Llama", "Lobster", "Mandrill", "Meerkat", "Mongoose",
    "Mongrel", "Monkey", "Moose", "Mouse", "Mule", "Ocelot", "Octopus", "Opossum", "Ostrich",
    "Otter", "Panther", "Parrot", "Peacock", "Pelican", "Penguin", "Pig", "Platypus", "Possum",
    "Rabbit", "Raccoon", "Rat", "Rattlesnake", "Reindeer", "Rhinoceros", "Salamander",
    "Scorpion", "Seahorse", "Seal", "Serval", "Sheep", "Shrimp", "Skunk", "Sloth", "Snake",
    "Squid", "Squirrel", "Starfish", "Stingray", "Tapir", "Tiger", "Tortoise", "Toucan",
    "Turkey", "Vulture", "Wallaby", "Walrus", "Warthog", "Wasp", "Weasel", "Wildebeest",
    "Wolf", "Wolverine", "Wombat", "Woodpecker", "Yak", "Zebra",
];

/// Returns a random "<Adjective> <Animal>" name.
pub fn generate() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("Quiet");
    let animal = ANIMALS.choose(&mut rng).copied().unwrap_or("Otter");
    format!("{} {}", adjective, animal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn generates_two_capitalized_words() {
        let word = Regex::new(r"^[A-Z][a-z]+\z").unwrap();
        for _ in 0..50 {
            let name = generate();
            let parts: Vec<_> = name.split(' ').collect();
            assert_eq!(parts.len(), 2);
            assert!(word.is_match(parts[0]), "bad adjective in {}", name);
            assert!(word.is_match(parts[1]), "bad animal in {}", name);
        }
    }

    #[test]
    fn generated_names_are_valid_display_names() {
        for _ in 0..50 {
            assert!(crate::domain::foundation::validate_display_name(&generate()).is_ok());
        }
    }
}
